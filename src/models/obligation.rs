//! Teaching obligation model.
//!
//! An obligation states that one teacher teaches one subject to one
//! class a fixed number of times per week. Obligations are supplied by
//! the assignment collaborator and are read-only during a run.

use serde::{Deserialize, Serialize};

/// Required weekly lessons for one (teacher, class, subject) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingObligation {
    /// Obligation identifier, carried into every placement it produces.
    pub id: String,
    /// Teacher identifier.
    pub teacher_id: String,
    /// Class identifier.
    pub class_id: String,
    /// Subject identifier.
    pub subject_id: String,
    /// Lessons per week. Zero produces no work.
    pub weekly_count: u32,
}

impl TeachingObligation {
    /// Creates an obligation. The id defaults to `teacher:class:subject`.
    pub fn new(
        teacher_id: impl Into<String>,
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        weekly_count: u32,
    ) -> Self {
        let teacher_id = teacher_id.into();
        let class_id = class_id.into();
        let subject_id = subject_id.into();
        Self {
            id: format!("{teacher_id}:{class_id}:{subject_id}"),
            teacher_id,
            class_id,
            subject_id,
            weekly_count,
        }
    }

    /// Overrides the obligation id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether this obligation requires any lessons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weekly_count == 0
    }
}

/// Sum of weekly lessons across obligations.
pub fn total_weekly_lessons(obligations: &[TeachingObligation]) -> usize {
    obligations.iter().map(|o| o.weekly_count as usize).sum()
}
