//! Collaborator seams.
//!
//! The generator does not own teachers, classes or calendars. It reads
//! obligations and templates through these traits and hands results to a
//! [`ScheduleSink`]. [`InMemoryStore`] implements all three for tests and
//! embedding.

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::models::{CalendarTemplate, ScheduleResult, TeachingObligation, TimetableRow, Weekday};

/// Supplies the obligations of a class.
pub trait ObligationSource {
    /// Obligations whose class is `class_id`.
    fn obligations_for_class(&self, class_id: &str) -> Vec<TeachingObligation>;
}

/// Supplies calendar templates by id.
pub trait CalendarSource {
    /// Template with the given id, if any.
    fn template(&self, template_id: &str) -> Option<CalendarTemplate>;
}

/// Accepts finished timetables.
pub trait ScheduleSink {
    /// Persists a result.
    fn persist(&mut self, result: &ScheduleResult) -> Result<()>;
}

/// In-memory store for obligations, templates and persisted rows.
///
/// Persisting upserts rows keyed by (class, day, period label), so a
/// re-run replaces the lessons it produces.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    obligations: Vec<TeachingObligation>,
    templates: HashMap<String, CalendarTemplate>,
    rows: BTreeMap<(String, Weekday, String), TimetableRow>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an obligation.
    pub fn add_obligation(&mut self, obligation: TeachingObligation) {
        self.obligations.push(obligation);
    }

    /// Adds or replaces a template, keyed by its name.
    pub fn add_template(&mut self, template: CalendarTemplate) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Persisted rows of a class, ordered by day then period label.
    pub fn rows_for_class(&self, class_id: &str) -> Vec<&TimetableRow> {
        self.rows
            .iter()
            .filter(|((class, _, _), _)| class == class_id)
            .map(|(_, row)| row)
            .collect()
    }

    /// Number of persisted rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl ObligationSource for InMemoryStore {
    fn obligations_for_class(&self, class_id: &str) -> Vec<TeachingObligation> {
        self.obligations
            .iter()
            .filter(|o| o.class_id == class_id)
            .cloned()
            .collect()
    }
}

impl CalendarSource for InMemoryStore {
    fn template(&self, template_id: &str) -> Option<CalendarTemplate> {
        self.templates.get(template_id).cloned()
    }
}

impl ScheduleSink for InMemoryStore {
    fn persist(&mut self, result: &ScheduleResult) -> Result<()> {
        for row in result.rows() {
            let key = (row.class_id.clone(), row.day, row.period_label.clone());
            self.rows.insert(key, row);
        }
        Ok(())
    }
}
