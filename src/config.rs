//! Generator configuration.
//!
//! Defaults describe a Sunday–Thursday school week where a subject may
//! appear once per day, or twice per day when it needs more than five
//! lessons a week.
//!
//! # TOML
//!
//! ```toml
//! seed = 42
//! working_days = ["Sun", "Mon", "Tue", "Wed", "Thu"]
//!
//! [subject_cap]
//! spread_threshold = 5
//! cap_at_or_below = 1
//! cap_above = 2
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, TimetableError};
use crate::models::Weekday;

/// Per-day repetition cap for a subject within one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectCapRule {
    /// Weekly total at or below which the tighter cap applies.
    pub spread_threshold: u32,
    /// Lessons per day allowed when weekly total ≤ threshold.
    pub cap_at_or_below: u32,
    /// Lessons per day allowed when weekly total > threshold.
    pub cap_above: u32,
}

impl Default for SubjectCapRule {
    fn default() -> Self {
        Self {
            spread_threshold: 5,
            cap_at_or_below: 1,
            cap_above: 2,
        }
    }
}

impl SubjectCapRule {
    /// Daily cap for a subject with the given weekly total.
    #[inline]
    pub fn cap_for(&self, weekly_total: u32) -> u32 {
        if weekly_total <= self.spread_threshold {
            self.cap_at_or_below
        } else {
            self.cap_above
        }
    }
}

/// Settings for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Working days in calendar order.
    pub working_days: Vec<Weekday>,
    /// Subject/day repetition rule.
    pub subject_cap: SubjectCapRule,
    /// Seed for [`GeneratorConfig::rng`].
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            working_days: vec![
                Weekday::Sun,
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
            ],
            subject_cap: SubjectCapRule::default(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the working days.
    pub fn with_working_days(mut self, days: Vec<Weekday>) -> Self {
        self.working_days = days;
        self
    }

    /// Sets the subject/day cap rule.
    pub fn with_subject_cap(mut self, rule: SubjectCapRule) -> Self {
        self.subject_cap = rule;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.working_days.is_empty() {
            return Err(TimetableError::Config(
                "working_days must not be empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for day in &self.working_days {
            if !seen.insert(*day) {
                return Err(TimetableError::Config(format!(
                    "working day {day} listed more than once"
                )));
            }
        }
        let cap = &self.subject_cap;
        if cap.cap_at_or_below == 0 {
            return Err(TimetableError::Config(
                "subject_cap.cap_at_or_below must be at least 1".to_string(),
            ));
        }
        if cap.cap_above < cap.cap_at_or_below {
            return Err(TimetableError::Config(format!(
                "subject_cap.cap_above ({}) is below cap_at_or_below ({})",
                cap.cap_above, cap.cap_at_or_below
            )));
        }
        Ok(())
    }

    /// Seeded random source for a run. A missing seed means 0.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_week() {
        let c = GeneratorConfig::default();
        assert_eq!(c.working_days.len(), 5);
        assert_eq!(c.working_days[0], Weekday::Sun);
        assert_eq!(c.working_days[4], Weekday::Thu);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_cap_rule() {
        let rule = SubjectCapRule::default();
        assert_eq!(rule.cap_for(0), 1);
        assert_eq!(rule.cap_for(5), 1);
        assert_eq!(rule.cap_for(6), 2);
        assert_eq!(rule.cap_for(10), 2);
    }

    #[test]
    fn test_from_toml() {
        let c = GeneratorConfig::from_toml_str(
            r#"
            seed = 7
            working_days = ["Mon", "Tue", "Wed", "Thu", "Fri"]

            [subject_cap]
            spread_threshold = 4
            "#,
        )
        .unwrap();
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.working_days[4], Weekday::Fri);
        assert_eq!(c.subject_cap.spread_threshold, 4);
        assert_eq!(c.subject_cap.cap_above, 2);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let c = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(c, GeneratorConfig::default());
    }

    #[test]
    fn test_invalid_configs() {
        let dup = GeneratorConfig::default().with_working_days(vec![Weekday::Sun, Weekday::Sun]);
        assert!(matches!(dup.validate(), Err(TimetableError::Config(_))));

        let empty = GeneratorConfig::default().with_working_days(vec![]);
        assert!(empty.validate().is_err());

        let caps = GeneratorConfig::default().with_subject_cap(SubjectCapRule {
            spread_threshold: 5,
            cap_at_or_below: 2,
            cap_above: 1,
        });
        assert!(caps.validate().is_err());

        let bad = GeneratorConfig::from_toml_str("working_days = [\"Xyz\"]");
        assert!(matches!(bad, Err(TimetableError::ConfigParse(_))));
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        let c = GeneratorConfig::default().with_seed(99);
        let a: u64 = c.rng().random();
        let b: u64 = c.rng().random();
        assert_eq!(a, b);
    }
}
