//! Calendar template expansion.
//!
//! Turns a [`CalendarTemplate`] into one ordered list of assignable
//! slots per working day. `ALL`-tagged slots are copied into every
//! working day; non-class blocks are dropped.
//!
//! Within a day, slots are ordered by `order`, then start time, then
//! label. The position in that list is the slot index used by the
//! tracker and reported in placements.

use tracing::debug;

use crate::models::{CalendarSlot, CalendarTemplate, Weekday};

/// Assignable slots for each working day.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSlots {
    days: Vec<Weekday>,
    slots: Vec<Vec<CalendarSlot>>,
}

impl WeekSlots {
    /// Expands a template over the given working days.
    ///
    /// Slots pinned to a day outside `working_days` are ignored. A day
    /// listed twice is kept once, at its first position.
    pub fn expand(template: &CalendarTemplate, working_days: &[Weekday]) -> Self {
        let mut days: Vec<Weekday> = Vec::with_capacity(working_days.len());
        for day in working_days {
            if !days.contains(day) {
                days.push(*day);
            }
        }
        let working_days = days;
        let mut slots: Vec<Vec<CalendarSlot>> = vec![Vec::new(); working_days.len()];

        for slot in template.slots.iter().filter(|s| s.is_assignable()) {
            for (d, day) in working_days.iter().enumerate() {
                if slot.day.covers(*day) {
                    slots[d].push(slot.clone());
                }
            }
        }

        for (d, day_slots) in slots.iter_mut().enumerate() {
            day_slots.sort_by(|a, b| {
                a.order
                    .cmp(&b.order)
                    .then(a.start_min.cmp(&b.start_min))
                    .then_with(|| a.label.cmp(&b.label))
            });
            debug!(
                template = %template.name,
                day = %working_days[d],
                slots = day_slots.len(),
                "expanded calendar day"
            );
        }

        Self {
            days: working_days,
            slots,
        }
    }

    /// Number of working days.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Working days in calendar order.
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// Weekday at a day index.
    #[inline]
    pub fn day(&self, day_idx: usize) -> Weekday {
        self.days[day_idx]
    }

    /// Ordered assignable slots of a day.
    #[inline]
    pub fn slots(&self, day_idx: usize) -> &[CalendarSlot] {
        &self.slots[day_idx]
    }

    /// Day index of a weekday, if it is a working day.
    pub fn index_of(&self, day: Weekday) -> Option<usize> {
        self.days.iter().position(|d| *d == day)
    }

    /// Total assignable slots across the week.
    pub fn total_slots(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{hm, BlockKind, DayTag};

    fn week() -> Vec<Weekday> {
        vec![
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
        ]
    }

    #[test]
    fn test_all_tag_replicated() {
        let t = CalendarTemplate::standard_week("std");
        let w = WeekSlots::expand(&t, &week());
        assert_eq!(w.day_count(), 5);
        for d in 0..5 {
            let labels: Vec<&str> = w.slots(d).iter().map(|s| s.label.as_str()).collect();
            assert_eq!(labels, vec!["1", "2", "3", "4", "5", "6", "7"]);
        }
        assert_eq!(w.total_slots(), 35);
    }

    #[test]
    fn test_non_class_blocks_dropped() {
        let t = CalendarTemplate::new("t")
            .with_slot(CalendarSlot::new("B", DayTag::All, BlockKind::Break, 1))
            .with_slot(CalendarSlot::new("P", DayTag::All, BlockKind::Prayer, 2))
            .with_slot(CalendarSlot::new("X", DayTag::All, BlockKind::Other, 3));
        let w = WeekSlots::expand(&t, &week());
        assert_eq!(w.total_slots(), 0);
    }

    fn thu(label: &str, order: u32, start: u16) -> CalendarSlot {
        CalendarSlot::class(label, DayTag::On(Weekday::Thu), order).with_times(start, start + 45)
    }

    #[test]
    fn test_repeated_day_expanded_once() {
        let t = CalendarTemplate::new("single").with_slot(CalendarSlot::class("1", DayTag::All, 1));
        let w = WeekSlots::expand(&t, &[Weekday::Sun, Weekday::Mon, Weekday::Sun]);

        assert_eq!(w.days(), &[Weekday::Sun, Weekday::Mon]);
        assert_eq!(w.total_slots(), 2);
    }

    #[test]
    fn test_day_specific_and_ordering() {
        let t = CalendarTemplate::new("t")
            .with_slot(thu("late", 2, hm(9, 0)))
            .with_slot(thu("b", 1, hm(8, 0)))
            .with_slot(thu("a", 1, hm(8, 0)))
            .with_slot(thu("early", 1, hm(7, 0)))
            .with_slot(CalendarSlot::class("fri", DayTag::On(Weekday::Fri), 1));
        let w = WeekSlots::expand(&t, &week());

        let thu = w.index_of(Weekday::Thu).unwrap();
        let labels: Vec<&str> = w.slots(thu).iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["early", "a", "b", "late"]);

        // Friday is not a working day
        assert_eq!(w.total_slots(), 4);
        assert!(w.index_of(Weekday::Fri).is_none());
        assert!(w.slots(w.index_of(Weekday::Sun).unwrap()).is_empty());
    }
}
