//! Placement task queue.
//!
//! Each obligation is exploded into one task per weekly lesson. Tasks
//! are ordered hardest-first: obligations with more weekly lessons run
//! out of feasible days sooner, so they are placed before the others.

use std::cmp::Reverse;

use crate::models::{Conflict, Placement, TeachingObligation, Weekday};

/// One lesson still waiting for a (day, slot).
///
/// Tasks only live for the duration of a run and borrow the obligation
/// they were built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementTask<'a> {
    /// Source obligation.
    pub obligation: &'a TeachingObligation,
}

impl<'a> PlacementTask<'a> {
    /// Teacher of the lesson.
    #[inline]
    pub fn teacher_id(&self) -> &'a str {
        &self.obligation.teacher_id
    }

    /// Subject of the lesson.
    #[inline]
    pub fn subject_id(&self) -> &'a str {
        &self.obligation.subject_id
    }

    /// Class of the lesson.
    #[inline]
    pub fn class_id(&self) -> &'a str {
        &self.obligation.class_id
    }

    /// Binds the lesson to a (day, slot).
    pub fn place_at(&self, day: Weekday, slot_index: usize, period_label: &str) -> Placement {
        Placement {
            day,
            slot_index,
            period_label: period_label.to_string(),
            teacher_id: self.obligation.teacher_id.clone(),
            class_id: self.obligation.class_id.clone(),
            subject_id: self.obligation.subject_id.clone(),
            obligation_id: self.obligation.id.clone(),
        }
    }

    /// Conflict record for this lesson.
    pub fn conflict(&self) -> Conflict {
        Conflict::unplaced(self.class_id(), self.subject_id(), self.teacher_id())
    }
}

/// Builds the priority-ordered task queue.
///
/// # Ordering
/// Descending weekly count, then ascending teacher id. The sort is
/// stable, so remaining ties keep input order.
pub fn build_tasks(obligations: &[TeachingObligation]) -> Vec<PlacementTask<'_>> {
    let mut tasks: Vec<PlacementTask<'_>> = obligations
        .iter()
        .flat_map(|ob| (0..ob.weekly_count).map(move |_| PlacementTask { obligation: ob }))
        .collect();

    tasks.sort_by(|a, b| {
        Reverse(a.obligation.weekly_count)
            .cmp(&Reverse(b.obligation.weekly_count))
            .then_with(|| a.teacher_id().cmp(b.teacher_id()))
    });
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_task_per_lesson() {
        let obs = vec![
            TeachingObligation::new("T1", "7A", "MATH", 3),
            TeachingObligation::new("T2", "7A", "SCI", 2),
        ];
        let tasks = build_tasks(&obs);
        assert_eq!(tasks.len(), 5);
        assert_eq!(tasks.iter().filter(|t| t.subject_id() == "MATH").count(), 3);
    }

    #[test]
    fn test_zero_count_produces_nothing() {
        let obs = vec![TeachingObligation::new("T1", "7A", "ART", 0)];
        assert!(build_tasks(&obs).is_empty());
        assert!(build_tasks(&[]).is_empty());
    }

    #[test]
    fn test_place_at_and_conflict() {
        let obs = vec![TeachingObligation::new("T1", "7A", "MATH", 1).with_id("ta-1")];
        let task = build_tasks(&obs)[0];

        let p = task.place_at(Weekday::Tue, 3, "4");
        assert_eq!(p.day, Weekday::Tue);
        assert_eq!(p.slot_index, 3);
        assert_eq!(p.period_label, "4");
        assert_eq!(p.obligation_id, "ta-1");

        let c = task.conflict();
        assert_eq!(c.class_id, "7A");
        assert_eq!(c.subject_id, "MATH");
        assert_eq!(c.teacher_id, "T1");
    }

    #[test]
    fn test_priority_order() {
        let obs = vec![
            TeachingObligation::new("T3", "7A", "ART", 1),
            TeachingObligation::new("T2", "7A", "SCI", 4),
            TeachingObligation::new("T1", "7A", "ENG", 4),
            TeachingObligation::new("T9", "7A", "MATH", 6),
        ];
        let tasks = build_tasks(&obs);
        let order: Vec<&str> = tasks.iter().map(|t| t.teacher_id()).collect();
        assert_eq!(
            order,
            vec![
                "T9", "T9", "T9", "T9", "T9", "T9", "T1", "T1", "T1", "T1", "T2", "T2", "T2", "T2",
                "T3"
            ]
        );
    }
}
