//! JSON transport adapter.
//!
//! Moves obligations, templates and results across process boundaries.
//! Results are written in the flat shape the persistence side expects:
//!
//! ```json
//! {
//!   "class_id": "7A",
//!   "rows": [
//!     { "day": "Sun", "period_label": "1", "teacher_id": "T1",
//!       "subject_id": "MATH", "class_id": "7A" }
//!   ],
//!   "conflicts": [
//!     { "class_id": "7A", "subject_id": "ART", "teacher_id": "T4",
//!       "reason": "no_slot_available_after_second_pass" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::models::{CalendarTemplate, Conflict, ScheduleResult, TeachingObligation, TimetableRow};

/// Flat, persistence-facing view of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultExport {
    /// Class the rows belong to.
    pub class_id: String,
    /// One row per placed lesson.
    pub rows: Vec<TimetableRow>,
    /// Lessons that could not be placed.
    pub conflicts: Vec<Conflict>,
}

impl From<&ScheduleResult> for ResultExport {
    fn from(result: &ScheduleResult) -> Self {
        Self {
            class_id: result.class_id.clone(),
            rows: result.rows(),
            conflicts: result.conflicts.clone(),
        }
    }
}

/// Encodes a result as pretty JSON.
pub fn result_to_json(result: &ScheduleResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ResultExport::from(result))?)
}

/// Writes a result as pretty JSON to a file.
pub fn write_result_json(result: &ScheduleResult, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, result_to_json(result)?)?;
    Ok(())
}

/// Decodes a JSON array of obligations.
pub fn obligations_from_json(s: &str) -> Result<Vec<TeachingObligation>> {
    Ok(serde_json::from_str(s)?)
}

/// Decodes a calendar template.
pub fn template_from_json(s: &str) -> Result<CalendarTemplate> {
    Ok(serde_json::from_str(s)?)
}
