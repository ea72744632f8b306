//! Timetable (solution) model.
//!
//! A schedule result holds the placements made for one class across the
//! working week, plus a conflict record for every lesson that could not
//! be placed. It is the only output of a generation run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::Weekday;

/// The outcome of one generation run for one class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Class this timetable belongs to.
    pub class_id: String,
    /// Placed lessons, in placement order.
    pub placements: Vec<Placement>,
    /// Lessons that could not be placed.
    pub conflicts: Vec<Conflict>,
}

/// A lesson bound to a (day, slot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Working day.
    pub day: Weekday,
    /// Index into that day's assignable slot list.
    pub slot_index: usize,
    /// Period label of the slot (e.g. `"3"`).
    pub period_label: String,
    /// Teacher identifier.
    pub teacher_id: String,
    /// Class identifier.
    pub class_id: String,
    /// Subject identifier.
    pub subject_id: String,
    /// Source obligation id.
    pub obligation_id: String,
}

/// A lesson that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Class identifier.
    pub class_id: String,
    /// Subject identifier.
    pub subject_id: String,
    /// Teacher identifier.
    pub teacher_id: String,
    /// Why the lesson was left out.
    pub reason: ConflictReason,
}

/// Classification of placement failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    /// Neither the greedy pass nor the repair pass found a legal slot.
    NoSlotAvailableAfterSecondPass,
}

impl ConflictReason {
    /// Wire string of the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictReason::NoSlotAvailableAfterSecondPass => "no_slot_available_after_second_pass",
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat row handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRow {
    /// Day of the lesson.
    pub day: Weekday,
    /// Period label of the slot.
    pub period_label: String,
    /// Teacher giving the lesson.
    pub teacher_id: String,
    /// Subject taught.
    pub subject_id: String,
    /// Class attending.
    pub class_id: String,
}

impl Conflict {
    /// Creates a conflict for a lesson that survived both passes unplaced.
    pub fn unplaced(
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        teacher_id: impl Into<String>,
    ) -> Self {
        Self {
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
            reason: ConflictReason::NoSlotAvailableAfterSecondPass,
        }
    }
}

impl ScheduleResult {
    /// Creates an empty result for a class.
    pub fn new(class_id: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            ..Self::default()
        }
    }

    /// Adds a placement.
    pub fn add_placement(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Adds a conflict.
    pub fn add_conflict(&mut self, conflict: Conflict) {
        self.conflicts.push(conflict);
    }

    /// Whether every requested lesson was placed.
    pub fn is_complete(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of placements.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Number of conflicts.
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// Placements on a given day, ordered by slot index.
    pub fn placements_on(&self, day: Weekday) -> Vec<&Placement> {
        let mut out: Vec<&Placement> = self.placements.iter().filter(|p| p.day == day).collect();
        out.sort_by_key(|p| p.slot_index);
        out
    }

    /// Placements taught by a given teacher.
    pub fn placements_for_teacher(&self, teacher_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.teacher_id == teacher_id)
            .collect()
    }

    /// Placement count per day for one subject.
    pub fn subject_days(&self, subject_id: &str) -> BTreeMap<Weekday, usize> {
        let mut counts = BTreeMap::new();
        for p in self.placements.iter().filter(|p| p.subject_id == subject_id) {
            *counts.entry(p.day).or_insert(0) += 1;
        }
        counts
    }

    /// Placement count per day.
    pub fn daily_load(&self) -> BTreeMap<Weekday, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.placements {
            *counts.entry(p.day).or_insert(0) += 1;
        }
        counts
    }

    /// Flat rows for persistence, ordered by day then slot.
    pub fn rows(&self) -> Vec<TimetableRow> {
        let mut sorted: Vec<&Placement> = self.placements.iter().collect();
        sorted.sort_by_key(|p| (p.day, p.slot_index));
        sorted
            .into_iter()
            .map(|p| TimetableRow {
                day: p.day,
                period_label: p.period_label.clone(),
                teacher_id: p.teacher_id.clone(),
                subject_id: p.subject_id.clone(),
                class_id: p.class_id.clone(),
            })
            .collect()
    }
}
