//! Pass 1: fairness-ordered greedy placement.
//!
//! # Algorithm
//!
//! For each task, in priority order:
//! 1. Rank days by class load, then teacher load, then a rotating offset
//!    that advances after every placement (all ascending).
//! 2. On the best day with any legal slot, score each legal slot by how
//!    often the teacher has already taught that period label, with a
//!    random tie-break.
//! 3. Take the lowest score. If no day has a legal slot, the task is
//!    left for the repair pass.
//!
//! No backtracking: a placed lesson is never moved.
//!
//! # Complexity
//! O(n * d * s) where n=tasks, d=working days, s=slots per day.

use rand::Rng;
use tracing::{debug, trace};

use crate::models::Placement;

use super::expander::WeekSlots;
use super::tasks::PlacementTask;
use super::tracker::ConflictTracker;

/// Greedy placer over an expanded week.
#[derive(Debug, Clone, Copy)]
pub struct GreedyPlacer<'w> {
    week: &'w WeekSlots,
}

impl<'w> GreedyPlacer<'w> {
    /// Creates a placer for the given week.
    pub fn new(week: &'w WeekSlots) -> Self {
        Self { week }
    }

    /// Day indices in preference order for a task.
    pub fn rank_days(&self, task: &PlacementTask<'_>, tracker: &ConflictTracker) -> Vec<usize> {
        let n = self.week.day_count();
        let rotation = tracker.rotation();
        let mut days: Vec<usize> = (0..n).collect();
        days.sort_by_key(|&d| {
            (
                tracker.class_load(d),
                tracker.teacher_load(task.teacher_id(), d),
                (d + n - rotation) % n,
            )
        });
        days
    }

    /// Tries to place one task. Commits to the tracker on success.
    pub fn place<R: Rng>(
        &self,
        task: &PlacementTask<'_>,
        tracker: &mut ConflictTracker,
        rng: &mut R,
    ) -> Option<Placement> {
        for day_idx in self.rank_days(task, tracker) {
            let slots = self.week.slots(day_idx);

            let best = slots
                .iter()
                .enumerate()
                .filter(|(i, slot)| tracker.can_place(task, day_idx, *i, slot))
                .map(|(i, slot)| {
                    let score = tracker.period_use(task.teacher_id(), &slot.label);
                    (score, rng.random::<f64>(), i)
                })
                .min_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));

            if let Some((_, _, slot_index)) = best {
                let slot = &slots[slot_index];
                tracker.commit(task, day_idx, slot_index, slot);
                tracker.advance_rotation();

                let placement = task.place_at(self.week.day(day_idx), slot_index, &slot.label);
                trace!(
                    teacher = %placement.teacher_id,
                    subject = %placement.subject_id,
                    day = %placement.day,
                    period = %placement.period_label,
                    "greedy placement"
                );
                return Some(placement);
            }
        }
        None
    }

    /// Runs the pass over the whole queue.
    ///
    /// Returns the placements made and the tasks left over, in queue order.
    pub fn run<'a, R: Rng>(
        &self,
        tasks: &[PlacementTask<'a>],
        tracker: &mut ConflictTracker,
        rng: &mut R,
    ) -> (Vec<Placement>, Vec<PlacementTask<'a>>) {
        let mut placements = Vec::with_capacity(tasks.len());
        let mut leftovers = Vec::new();

        for task in tasks {
            match self.place(task, tracker, rng) {
                Some(p) => placements.push(p),
                None => leftovers.push(*task),
            }
        }

        if !leftovers.is_empty() {
            debug!(
                placed = placements.len(),
                leftover = leftovers.len(),
                "greedy pass left tasks for repair"
            );
        }
        (placements, leftovers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubjectCapRule;
    use crate::models::{CalendarSlot, CalendarTemplate, DayTag, TeachingObligation, Weekday};
    use crate::scheduler::tasks::build_tasks;
    use crate::scheduler::tracker::TeacherOccupancy;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn week_days() -> Vec<Weekday> {
        vec![
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
        ]
    }

    fn setup(obs: &[TeachingObligation]) -> (WeekSlots, ConflictTracker) {
        let days = week_days();
        let week = WeekSlots::expand(&CalendarTemplate::standard_week("std"), &days);
        let tracker =
            ConflictTracker::new(&days, obs, &SubjectCapRule::default(), TeacherOccupancy::new());
        (week, tracker)
    }

    #[test]
    fn test_rank_days_rotation_on_ties() {
        let obs = vec![TeachingObligation::new("T1", "7A", "MATH", 1)];
        let (week, mut tracker) = setup(&obs);
        let tasks = build_tasks(&obs);
        let placer = GreedyPlacer::new(&week);

        assert_eq!(placer.rank_days(&tasks[0], &tracker), vec![0, 1, 2, 3, 4]);
        tracker.advance_rotation();
        tracker.advance_rotation();
        assert_eq!(placer.rank_days(&tasks[0], &tracker), vec![2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_rank_days_prefers_light_days() {
        let obs = vec![
            TeachingObligation::new("T1", "7A", "MATH", 1),
            TeachingObligation::new("T2", "7A", "SCI", 1),
        ];
        let (week, mut tracker) = setup(&obs);
        let tasks = build_tasks(&obs);
        let placer = GreedyPlacer::new(&week);

        // T1 lesson on Sun: Sun now heavier for the class
        let first = week.slots(0)[0].clone();
        tracker.commit(&tasks[0], 0, 0, &first);
        let ranked = placer.rank_days(&tasks[1], &tracker);
        assert_eq!(*ranked.last().unwrap(), 0);
    }

    #[test]
    fn test_five_lessons_one_per_day() {
        let obs = vec![TeachingObligation::new("T1", "7A", "MATH", 5)];
        let (week, mut tracker) = setup(&obs);
        let tasks = build_tasks(&obs);
        let mut rng = SmallRng::seed_from_u64(1);

        let (placements, leftovers) =
            GreedyPlacer::new(&week).run(&tasks, &mut tracker, &mut rng);
        assert_eq!(placements.len(), 5);
        assert!(leftovers.is_empty());
        for d in 0..5 {
            assert_eq!(tracker.class_load(d), 1);
        }
    }

    #[test]
    fn test_spreads_teacher_periods() {
        let obs = vec![TeachingObligation::new("T1", "7A", "MATH", 5)];
        let (week, mut tracker) = setup(&obs);
        let tasks = build_tasks(&obs);
        let mut rng = SmallRng::seed_from_u64(3);

        let (placements, _) = GreedyPlacer::new(&week).run(&tasks, &mut tracker, &mut rng);
        let mut labels: Vec<&str> = placements.iter().map(|p| p.period_label.as_str()).collect();
        labels.sort();
        labels.dedup();
        // Each lesson lands on a period the teacher has not used yet
        assert_eq!(labels.len(), 5);
    }

    #[test]
    fn test_unplaceable_left_over() {
        let days = week_days();
        let template = CalendarTemplate::new("one")
            .with_slot(CalendarSlot::class("1", DayTag::On(Weekday::Sun), 1));
        let week = WeekSlots::expand(&template, &days);
        let obs = vec![
            TeachingObligation::new("T1", "7A", "MATH", 1),
            TeachingObligation::new("T2", "7A", "SCI", 1),
        ];
        let mut tracker =
            ConflictTracker::new(&days, &obs, &SubjectCapRule::default(), TeacherOccupancy::new());
        let tasks = build_tasks(&obs);
        let mut rng = SmallRng::seed_from_u64(0);

        let (placements, leftovers) =
            GreedyPlacer::new(&week).run(&tasks, &mut tracker, &mut rng);
        assert_eq!(placements.len(), 1);
        assert_eq!(leftovers.len(), 1);
        assert_eq!(leftovers[0].teacher_id(), "T2");
    }
}
