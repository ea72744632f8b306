//! Timetable generation and KPI evaluation.
//!
//! # Algorithm
//!
//! A two-pass heuristic over one class's week:
//! - **Greedy** ([`GreedyPlacer`]): hardest obligations first, least
//!   loaded day first, least used period for the teacher first.
//! - **Repair** ([`RepairPlacer`]): randomized first-fit for whatever the
//!   greedy pass left, under the same hard rules.
//!
//! It never double-books a teacher or the class and never exceeds the
//! subject/day cap. It does not promise an optimal spread.
//!
//! # KPI
//!
//! [`TimetableKpi`] reports placement rate and load spread.

mod engine;
mod expander;
mod greedy;
mod kpi;
mod repair;
mod tasks;
mod tracker;

pub use engine::{ScheduleRequest, TimetableGenerator};
pub use expander::WeekSlots;
pub use greedy::GreedyPlacer;
pub use kpi::TimetableKpi;
pub use repair::RepairPlacer;
pub use tasks::{build_tasks, PlacementTask};
pub use tracker::{ConflictTracker, TeacherOccupancy};
