//! Timetabling domain models.
//!
//! Provides the input and output types of a generation run.
//!
//! # Domain Mappings
//!
//! | u-timetable | School |
//! |-------------|--------|
//! | CalendarTemplate | Bell schedule |
//! | CalendarSlot | Period / break / prayer block |
//! | TeachingObligation | Teaching assignment (weekly load) |
//! | Placement | Timetable entry |
//! | Conflict | Unmet weekly lesson |

mod calendar;
mod obligation;
mod schedule;

pub use calendar::{hm, BlockKind, CalendarSlot, CalendarTemplate, DayTag, Weekday};
pub use obligation::{total_weekly_lessons, TeachingObligation};
pub use schedule::{Conflict, ConflictReason, Placement, ScheduleResult, TimetableRow};
