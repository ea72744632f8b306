//! Pass 2: randomized best-effort repair.
//!
//! Every task the greedy pass could not place gets one more attempt.
//! Days are visited in shuffled order and, inside each day, slots in
//! shuffled order; the first slot passing the hard rules wins. Fairness
//! is ignored. Whatever still fails becomes a [`Conflict`].

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{trace, warn};

use crate::models::{Conflict, Placement};

use super::expander::WeekSlots;
use super::tasks::PlacementTask;
use super::tracker::ConflictTracker;

/// Randomized first-fit placer.
#[derive(Debug, Clone, Copy)]
pub struct RepairPlacer<'w> {
    week: &'w WeekSlots,
}

impl<'w> RepairPlacer<'w> {
    /// Creates a placer for the given week.
    pub fn new(week: &'w WeekSlots) -> Self {
        Self { week }
    }

    /// Tries to place one task. Commits to the tracker on success.
    pub fn place<R: Rng>(
        &self,
        task: &PlacementTask<'_>,
        tracker: &mut ConflictTracker,
        rng: &mut R,
    ) -> Option<Placement> {
        let mut days: Vec<usize> = (0..self.week.day_count()).collect();
        days.shuffle(rng);

        for day_idx in days {
            let slots = self.week.slots(day_idx);
            let mut order: Vec<usize> = (0..slots.len()).collect();
            order.shuffle(rng);

            if let Some(slot_index) = order
                .into_iter()
                .find(|&i| tracker.can_place(task, day_idx, i, &slots[i]))
            {
                let slot = &slots[slot_index];
                tracker.commit(task, day_idx, slot_index, slot);

                let placement = task.place_at(self.week.day(day_idx), slot_index, &slot.label);
                trace!(
                    teacher = %placement.teacher_id,
                    subject = %placement.subject_id,
                    day = %placement.day,
                    period = %placement.period_label,
                    "repair placement"
                );
                return Some(placement);
            }
        }
        None
    }

    /// Runs the pass over the greedy leftovers.
    ///
    /// Returns the placements recovered and one conflict per task that
    /// still has no slot.
    pub fn run<R: Rng>(
        &self,
        leftovers: &[PlacementTask<'_>],
        tracker: &mut ConflictTracker,
        rng: &mut R,
    ) -> (Vec<Placement>, Vec<Conflict>) {
        let mut placements = Vec::new();
        let mut conflicts = Vec::new();

        for task in leftovers {
            match self.place(task, tracker, rng) {
                Some(p) => placements.push(p),
                None => {
                    let conflict = task.conflict();
                    warn!(
                        class = %conflict.class_id,
                        subject = %conflict.subject_id,
                        teacher = %conflict.teacher_id,
                        reason = %conflict.reason,
                        "lesson could not be placed"
                    );
                    conflicts.push(conflict);
                }
            }
        }
        (placements, conflicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubjectCapRule;
    use crate::models::{
        CalendarSlot, CalendarTemplate, ConflictReason, DayTag, TeachingObligation, Weekday,
    };
    use crate::scheduler::tasks::build_tasks;
    use crate::scheduler::tracker::TeacherOccupancy;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn days() -> Vec<Weekday> {
        vec![
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
        ]
    }

    #[test]
    fn test_places_into_only_free_slot() {
        let days = days();
        let week = WeekSlots::expand(&CalendarTemplate::standard_week("std"), &days);
        let obs = vec![TeachingObligation::new("T1", "7A", "MATH", 1)];
        let tasks = build_tasks(&obs);

        // Teacher busy everywhere except Wed period index 5
        let mut occ = TeacherOccupancy::new();
        for (d, day) in days.iter().enumerate() {
            for (i, slot) in week.slots(d).iter().enumerate() {
                if !(*day == Weekday::Wed && i == 5) {
                    occ.occupy("T1", *day, slot);
                }
            }
        }
        let mut tracker = ConflictTracker::new(&days, &obs, &SubjectCapRule::default(), occ);
        let mut rng = SmallRng::seed_from_u64(11);

        let (placed, conflicts) =
            RepairPlacer::new(&week).run(&tasks, &mut tracker, &mut rng);
        assert!(conflicts.is_empty());
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].day, Weekday::Wed);
        assert_eq!(placed[0].slot_index, 5);
        assert_eq!(placed[0].period_label, "6");
    }

    #[test]
    fn test_respects_subject_cap() {
        let days = days();
        let template = CalendarTemplate::new("mon-only")
            .with_slot(CalendarSlot::class("1", DayTag::On(Weekday::Mon), 1))
            .with_slot(CalendarSlot::class("2", DayTag::On(Weekday::Mon), 2));
        let week = WeekSlots::expand(&template, &days);
        let obs = vec![TeachingObligation::new("T1", "7A", "MATH", 2)];
        let tasks = build_tasks(&obs);
        let mut tracker =
            ConflictTracker::new(&days, &obs, &SubjectCapRule::default(), TeacherOccupancy::new());
        let mut rng = SmallRng::seed_from_u64(5);

        let (placed, conflicts) =
            RepairPlacer::new(&week).run(&tasks, &mut tracker, &mut rng);
        // Cap is 1/day for a 2/week subject, and only Monday has slots
        assert_eq!(placed.len(), 1);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].reason, ConflictReason::NoSlotAvailableAfterSecondPass);
    }

    #[test]
    fn test_empty_leftovers() {
        let days = days();
        let week = WeekSlots::expand(&CalendarTemplate::standard_week("std"), &days);
        let mut tracker =
            ConflictTracker::new(&days, &[], &SubjectCapRule::default(), TeacherOccupancy::new());
        let mut rng = SmallRng::seed_from_u64(0);

        let (placed, conflicts) =
            RepairPlacer::new(&week).run(&[], &mut tracker, &mut rng);
        assert!(placed.is_empty());
        assert!(conflicts.is_empty());
    }
}
