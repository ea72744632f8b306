//! Weekly school timetable generator.
//!
//! Places each class's required weekly lessons (teacher × subject ×
//! lessons-per-week) into a calendar template of days × periods, never
//! double-booking a teacher or a class, while spreading lessons across
//! the week and across period positions.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `CalendarTemplate`, `CalendarSlot`,
//!   `TeachingObligation`, `Placement`, `Conflict`, `ScheduleResult`
//! - **`scheduler`**: Template expansion, task queue, conflict tracker,
//!   greedy and repair passes, run orchestration, KPIs
//! - **`validation`**: Input checks and post-run invariant audits
//! - **`config`**: Generator settings (working days, subject cap, seed)
//! - **`sources`**: Collaborator traits for obligations, templates, persistence
//! - **`export`**: JSON transport adapter
//!
//! # Determinism
//!
//! Every randomized step draws from the `Rng` passed into the run, so a
//! fixed seed reproduces the same timetable.

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod scheduler;
pub mod sources;
pub mod validation;

pub use error::{Result, TimetableError};
