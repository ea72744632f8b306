//! Run state: occupancy, load counters and fairness histogram.
//!
//! A [`ConflictTracker`] is owned by exactly one generation run and is
//! threaded by `&mut` through the greedy and repair passes. The teacher
//! occupancy part is split into [`TeacherOccupancy`] so that runs for
//! several classes can share it, one after another, without ever
//! double-booking a teacher.
//!
//! # Hard rules
//! - A teacher teaches at most one lesson at a time on a day.
//! - The class occupies at most one lesson per (day, slot).
//! - A subject appears at most `cap` times per day, where `cap` comes
//!   from [`SubjectCapRule`] applied to the subject's weekly total.
//!
//! # Teacher clashes
//! Teacher bookings are compared by time, not by slot index, so classes
//! on different bell schedules still share one occupancy safely. Two
//! timed slots clash when their `[start, end)` ranges overlap. A slot
//! without times (`end_min <= start_min`) clashes with any booking that
//! carries the same period label.

use std::collections::{BTreeSet, HashMap};

use crate::config::SubjectCapRule;
use crate::models::{CalendarSlot, TeachingObligation, Weekday};

use super::tasks::PlacementTask;

/// Time span of one teacher booking.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Booking {
    label: String,
    start_min: u16,
    end_min: u16,
}

impl Booking {
    fn of(slot: &CalendarSlot) -> Self {
        Self {
            label: slot.label.clone(),
            start_min: slot.start_min,
            end_min: slot.end_min,
        }
    }

    #[inline]
    fn is_timed(&self) -> bool {
        self.end_min > self.start_min
    }

    fn clashes(&self, other: &Booking) -> bool {
        if self.is_timed() && other.is_timed() {
            self.start_min < other.end_min && other.start_min < self.end_min
        } else {
            self.label == other.label
        }
    }
}

/// Teacher bookings per day, shareable across class runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherOccupancy {
    busy: HashMap<String, HashMap<Weekday, Vec<Booking>>>,
}

impl TeacherOccupancy {
    /// Creates an empty occupancy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the teacher already teaches at a time clashing with `slot`.
    pub fn is_busy(&self, teacher_id: &str, day: Weekday, slot: &CalendarSlot) -> bool {
        let wanted = Booking::of(slot);
        self.busy
            .get(teacher_id)
            .and_then(|days| days.get(&day))
            .is_some_and(|bookings| bookings.iter().any(|b| b.clashes(&wanted)))
    }

    /// Books `slot` for the teacher. Returns `false` if it clashes.
    pub fn occupy(&mut self, teacher_id: &str, day: Weekday, slot: &CalendarSlot) -> bool {
        if self.is_busy(teacher_id, day, slot) {
            return false;
        }
        self.busy
            .entry(teacher_id.to_string())
            .or_default()
            .entry(day)
            .or_default()
            .push(Booking::of(slot));
        true
    }

    /// Lessons the teacher has on a day.
    pub fn daily_load(&self, teacher_id: &str, day: Weekday) -> usize {
        self.busy
            .get(teacher_id)
            .and_then(|days| days.get(&day))
            .map_or(0, Vec::len)
    }

    /// Lessons the teacher has across the week.
    pub fn weekly_load(&self, teacher_id: &str) -> usize {
        self.busy
            .get(teacher_id)
            .map_or(0, |days| days.values().map(Vec::len).sum())
    }

    /// Total bookings across all teachers.
    pub fn total_occupied(&self) -> usize {
        self.busy
            .values()
            .flat_map(|days| days.values())
            .map(Vec::len)
            .sum()
    }
}

/// Mutable state of one generation run.
#[derive(Debug, Clone)]
pub struct ConflictTracker {
    days: Vec<Weekday>,
    teachers: TeacherOccupancy,
    class_busy: Vec<BTreeSet<usize>>,
    class_load: Vec<usize>,
    subject_day: HashMap<(String, usize), u32>,
    subject_caps: HashMap<String, u32>,
    default_cap: u32,
    period_use: HashMap<String, HashMap<String, u32>>,
    rotation: usize,
}

impl ConflictTracker {
    /// Creates the tracker for one class run.
    ///
    /// Subject caps are derived from each subject's weekly total summed
    /// over all obligations of the class, across teachers.
    pub fn new(
        days: &[Weekday],
        obligations: &[TeachingObligation],
        cap_rule: &SubjectCapRule,
        teachers: TeacherOccupancy,
    ) -> Self {
        let mut weekly_totals: HashMap<&str, u32> = HashMap::new();
        for ob in obligations {
            *weekly_totals.entry(ob.subject_id.as_str()).or_insert(0) += ob.weekly_count;
        }
        let subject_caps = weekly_totals
            .into_iter()
            .map(|(subject, total)| (subject.to_string(), cap_rule.cap_for(total)))
            .collect();

        Self {
            days: days.to_vec(),
            teachers,
            class_busy: vec![BTreeSet::new(); days.len()],
            class_load: vec![0; days.len()],
            subject_day: HashMap::new(),
            subject_caps,
            default_cap: cap_rule.cap_at_or_below,
            period_use: HashMap::new(),
            rotation: 0,
        }
    }

    /// Number of working days tracked.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Lessons placed for the class on a day.
    #[inline]
    pub fn class_load(&self, day_idx: usize) -> usize {
        self.class_load[day_idx]
    }

    /// Lessons the teacher has on a day (across every class sharing the occupancy).
    pub fn teacher_load(&self, teacher_id: &str, day_idx: usize) -> usize {
        self.teachers.daily_load(teacher_id, self.days[day_idx])
    }

    /// Daily cap for a subject.
    pub fn subject_cap(&self, subject_id: &str) -> u32 {
        self.subject_caps
            .get(subject_id)
            .copied()
            .unwrap_or(self.default_cap)
    }

    /// Lessons of a subject already placed on a day.
    pub fn subject_count(&self, subject_id: &str, day_idx: usize) -> u32 {
        self.subject_day
            .get(&(subject_id.to_string(), day_idx))
            .copied()
            .unwrap_or(0)
    }

    /// Times the teacher has been placed at a period label in this run.
    pub fn period_use(&self, teacher_id: &str, period_label: &str) -> u32 {
        self.period_use
            .get(teacher_id)
            .and_then(|h| h.get(period_label))
            .copied()
            .unwrap_or(0)
    }

    /// Whether the task may go to `slot` (index `slot_index` on the day)
    /// under every hard rule.
    pub fn can_place(
        &self,
        task: &PlacementTask<'_>,
        day_idx: usize,
        slot_index: usize,
        slot: &CalendarSlot,
    ) -> bool {
        !self.class_busy[day_idx].contains(&slot_index)
            && !self.teachers.is_busy(task.teacher_id(), self.days[day_idx], slot)
            && self.subject_count(task.subject_id(), day_idx) < self.subject_cap(task.subject_id())
    }

    /// Records a placement in every counter.
    pub fn commit(
        &mut self,
        task: &PlacementTask<'_>,
        day_idx: usize,
        slot_index: usize,
        slot: &CalendarSlot,
    ) {
        let teacher = task.teacher_id();
        self.teachers.occupy(teacher, self.days[day_idx], slot);
        self.class_busy[day_idx].insert(slot_index);
        self.class_load[day_idx] += 1;
        *self
            .subject_day
            .entry((task.subject_id().to_string(), day_idx))
            .or_insert(0) += 1;
        *self
            .period_use
            .entry(teacher.to_string())
            .or_default()
            .entry(slot.label.clone())
            .or_insert(0) += 1;
    }

    /// Current rotating tie-break offset.
    #[inline]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Advances the rotating tie-break by one day.
    pub fn advance_rotation(&mut self) {
        if !self.days.is_empty() {
            self.rotation = (self.rotation + 1) % self.days.len();
        }
    }

    /// Shared teacher occupancy.
    pub fn teacher_occupancy(&self) -> &TeacherOccupancy {
        &self.teachers
    }

    /// Releases the teacher occupancy for the next class run.
    pub fn into_teacher_occupancy(self) -> TeacherOccupancy {
        self.teachers
    }
}
