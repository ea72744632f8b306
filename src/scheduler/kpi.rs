//! Timetable quality metrics (KPIs).
//!
//! Soft constraints are not guaranteed, so these metrics report how well
//! a finished timetable spreads its load.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement rate | placed / (placed + conflicts) |
//! | Daily load | Lessons per working day |
//! | Day-load spread | max − min daily load |
//! | Teacher period spread | Per teacher, max − min uses over the period labels they teach |
//! | Avg teacher period spread | Mean of the above |

use std::collections::{BTreeMap, HashMap};

use crate::models::{ScheduleResult, Weekday};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Lessons placed.
    pub placed: usize,
    /// Lessons left as conflicts.
    pub conflicts: usize,
    /// Fraction of lessons placed (1.0 when nothing was requested).
    pub placement_rate: f64,
    /// Lessons per working day, zero-filled.
    pub daily_load: BTreeMap<Weekday, usize>,
    /// max − min of `daily_load`.
    pub day_load_spread: usize,
    /// Per-teacher max − min period-label usage.
    pub teacher_period_spread: HashMap<String, u32>,
    /// Mean of `teacher_period_spread` (0.0 with no teachers).
    pub avg_teacher_period_spread: f64,
}

impl TimetableKpi {
    /// Computes KPIs from a result over the given working days.
    pub fn calculate(result: &ScheduleResult, working_days: &[Weekday]) -> Self {
        let placed = result.placement_count();
        let conflicts = result.conflict_count();
        let requested = placed + conflicts;
        let placement_rate = if requested == 0 {
            1.0
        } else {
            placed as f64 / requested as f64
        };

        let mut daily_load: BTreeMap<Weekday, usize> =
            working_days.iter().map(|d| (*d, 0)).collect();
        for (day, count) in result.daily_load() {
            *daily_load.entry(day).or_insert(0) += count;
        }
        let day_load_spread = match (daily_load.values().max(), daily_load.values().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        };

        let mut usage: HashMap<&str, HashMap<&str, u32>> = HashMap::new();
        for p in &result.placements {
            *usage
                .entry(p.teacher_id.as_str())
                .or_default()
                .entry(p.period_label.as_str())
                .or_insert(0) += 1;
        }
        let teacher_period_spread: HashMap<String, u32> = usage
            .into_iter()
            .map(|(teacher, hist)| {
                let max = hist.values().copied().max().unwrap_or(0);
                let min = hist.values().copied().min().unwrap_or(0);
                (teacher.to_string(), max - min)
            })
            .collect();
        let avg_teacher_period_spread = if teacher_period_spread.is_empty() {
            0.0
        } else {
            let sum: u32 = teacher_period_spread.values().sum();
            sum as f64 / teacher_period_spread.len() as f64
        };

        Self {
            placed,
            conflicts,
            placement_rate,
            daily_load,
            day_load_spread,
            teacher_period_spread,
            avg_teacher_period_spread,
        }
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_placement_rate: f64, max_day_load_spread: usize) -> bool {
        self.placement_rate >= min_placement_rate && self.day_load_spread <= max_day_load_spread
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Conflict, Placement};

    fn week() -> Vec<Weekday> {
        vec![
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
        ]
    }

    fn placement(day: Weekday, label: &str, teacher: &str) -> Placement {
        Placement {
            day,
            slot_index: 0,
            period_label: label.into(),
            teacher_id: teacher.into(),
            class_id: "7A".into(),
            subject_id: "MATH".into(),
            obligation_id: "ob".into(),
        }
    }

    #[test]
    fn test_kpi_basic() {
        let mut r = ScheduleResult::new("7A");
        r.add_placement(placement(Weekday::Sun, "1", "T1"));
        r.add_placement(placement(Weekday::Sun, "2", "T1"));
        r.add_placement(placement(Weekday::Mon, "1", "T1"));
        r.add_placement(placement(Weekday::Tue, "3", "T2"));
        r.add_conflict(Conflict::unplaced("7A", "ART", "T3"));

        let kpi = TimetableKpi::calculate(&r, &week());
        assert_eq!(kpi.placed, 4);
        assert_eq!(kpi.conflicts, 1);
        assert!((kpi.placement_rate - 0.8).abs() < 1e-10);
        assert_eq!(kpi.daily_load[&Weekday::Sun], 2);
        assert_eq!(kpi.daily_load[&Weekday::Thu], 0);
        assert_eq!(kpi.day_load_spread, 2);
        // T1: "1" twice, "2" once → spread 1; T2: one label → 0
        assert_eq!(kpi.teacher_period_spread["T1"], 1);
        assert_eq!(kpi.teacher_period_spread["T2"], 0);
        assert!((kpi.avg_teacher_period_spread - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = TimetableKpi::calculate(&ScheduleResult::new("7A"), &week());
        assert_eq!(kpi.placement_rate, 1.0);
        assert_eq!(kpi.day_load_spread, 0);
        assert_eq!(kpi.avg_teacher_period_spread, 0.0);
        assert!(kpi.meets_thresholds(1.0, 0));
    }

    #[test]
    fn test_thresholds() {
        let mut r = ScheduleResult::new("7A");
        r.add_placement(placement(Weekday::Sun, "1", "T1"));
        r.add_conflict(Conflict::unplaced("7A", "ART", "T3"));
        let kpi = TimetableKpi::calculate(&r, &week());
        assert!(!kpi.meets_thresholds(0.9, 5));
        assert!(kpi.meets_thresholds(0.5, 1));
    }
}
