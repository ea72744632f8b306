//! Input and output audits for timetable runs.
//!
//! The generator trusts its inputs; these checks are opt-in for callers
//! that want to catch bad data before a run, or verify a finished
//! timetable before persisting it.
//!
//! Input checks ([`validate_input`]):
//! - Working days without any class slot
//! - Duplicate (teacher, class, subject) obligations
//! - Empty identifiers
//!
//! Output checks ([`validate_result`]):
//! - Teacher booked twice at the same (day, slot)
//! - Class booked twice at the same (day, slot)
//! - Placements + conflicts not matching the weekly lesson total
//! - Subject repeated beyond its daily cap

use std::collections::{HashMap, HashSet};

use crate::config::SubjectCapRule;
use crate::models::{CalendarTemplate, ScheduleResult, TeachingObligation, Weekday};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A working day has no assignable slot.
    NoClassSlots,
    /// Two obligations share (teacher, class, subject).
    DuplicateObligation,
    /// An obligation has an empty identifier.
    EmptyId,
    /// A teacher is placed twice at the same (day, slot).
    TeacherDoubleBooked,
    /// The class is placed twice at the same (day, slot).
    ClassDoubleBooked,
    /// Placements + conflicts differ from the requested lesson total.
    LessonCountMismatch,
    /// A subject exceeds its per-day cap.
    SubjectCapExceeded,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks run inputs.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    template: &CalendarTemplate,
    obligations: &[TeachingObligation],
    working_days: &[Weekday],
) -> ValidationResult {
    let mut errors = Vec::new();

    for day in working_days {
        let has_class = template
            .slots
            .iter()
            .any(|s| s.is_assignable() && s.day.covers(*day));
        if !has_class {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoClassSlots,
                format!("Template '{}' has no class slot on {}", template.name, day),
            ));
        }
    }

    let mut triples = HashSet::new();
    for ob in obligations {
        if ob.teacher_id.is_empty() || ob.class_id.is_empty() || ob.subject_id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Obligation '{}' has an empty teacher, class or subject id", ob.id),
            ));
        }
        let key = (
            ob.teacher_id.as_str(),
            ob.class_id.as_str(),
            ob.subject_id.as_str(),
        );
        if !triples.insert(key) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateObligation,
                format!(
                    "Duplicate obligation for teacher '{}', class '{}', subject '{}'",
                    key.0, key.1, key.2
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks a finished timetable against its obligations.
///
/// Only obligations of `result.class_id` are counted.
pub fn validate_result(
    result: &ScheduleResult,
    obligations: &[TeachingObligation],
    cap_rule: &SubjectCapRule,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut teacher_slots = HashSet::new();
    let mut class_slots = HashSet::new();
    for p in &result.placements {
        if !teacher_slots.insert((p.teacher_id.as_str(), p.day, p.slot_index)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::TeacherDoubleBooked,
                format!(
                    "Teacher '{}' booked twice on {} slot {}",
                    p.teacher_id, p.day, p.slot_index
                ),
            ));
        }
        if !class_slots.insert((p.class_id.as_str(), p.day, p.slot_index)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ClassDoubleBooked,
                format!(
                    "Class '{}' booked twice on {} slot {}",
                    p.class_id, p.day, p.slot_index
                ),
            ));
        }
    }

    let mut weekly_totals: HashMap<&str, u32> = HashMap::new();
    let mut expected: usize = 0;
    for ob in obligations.iter().filter(|o| o.class_id == result.class_id) {
        *weekly_totals.entry(ob.subject_id.as_str()).or_insert(0) += ob.weekly_count;
        expected += ob.weekly_count as usize;
    }

    let actual = result.placement_count() + result.conflict_count();
    if actual != expected {
        errors.push(ValidationError::new(
            ValidationErrorKind::LessonCountMismatch,
            format!(
                "Class '{}' accounts for {actual} lessons, obligations require {expected}",
                result.class_id
            ),
        ));
    }

    let mut per_day: HashMap<(&str, Weekday), u32> = HashMap::new();
    for p in &result.placements {
        *per_day.entry((p.subject_id.as_str(), p.day)).or_insert(0) += 1;
    }
    for ((subject, day), count) in per_day {
        let total = weekly_totals.get(subject).copied().unwrap_or(0);
        let cap = cap_rule.cap_for(total);
        if count > cap {
            errors.push(ValidationError::new(
                ValidationErrorKind::SubjectCapExceeded,
                format!("Subject '{subject}' placed {count} times on {day} (cap {cap})"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
