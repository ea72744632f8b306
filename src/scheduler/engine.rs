//! Generation run orchestration.
//!
//! # Pipeline
//!
//! 1. Expand the calendar template into per-day slot lists.
//! 2. Build the priority-ordered task queue from the class obligations.
//! 3. Greedy pass ([`GreedyPlacer`]) over the queue.
//! 4. Repair pass ([`RepairPlacer`]) over the leftovers.
//! 5. Assemble placements and conflicts into a [`ScheduleResult`].
//!
//! A run is a pure function of (obligations, template, random source).
//! No state survives it except the optional [`TeacherOccupancy`] handed
//! back to the caller for scheduling further classes.

use rand::Rng;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::{Result, TimetableError};
use crate::models::{CalendarTemplate, ScheduleResult, TeachingObligation};
use crate::sources::{CalendarSource, ObligationSource};

use super::expander::WeekSlots;
use super::greedy::GreedyPlacer;
use super::repair::RepairPlacer;
use super::tasks::build_tasks;
use super::tracker::{ConflictTracker, TeacherOccupancy};

/// Input for one class run.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// Class to schedule.
    pub class_id: String,
    /// Calendar template for the class.
    pub template: CalendarTemplate,
    /// Obligations of the class. Entries for other classes are ignored.
    pub obligations: Vec<TeachingObligation>,
}

impl ScheduleRequest {
    /// Creates a request with no obligations.
    pub fn new(class_id: impl Into<String>, template: CalendarTemplate) -> Self {
        Self {
            class_id: class_id.into(),
            template,
            obligations: Vec::new(),
        }
    }

    /// Adds an obligation.
    pub fn with_obligation(mut self, obligation: TeachingObligation) -> Self {
        self.obligations.push(obligation);
        self
    }

    /// Adds several obligations.
    pub fn with_obligations(
        mut self,
        obligations: impl IntoIterator<Item = TeachingObligation>,
    ) -> Self {
        self.obligations.extend(obligations);
        self
    }
}

/// Two-pass weekly timetable generator.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_timetable::models::{CalendarTemplate, TeachingObligation};
/// use u_timetable::scheduler::{ScheduleRequest, TimetableGenerator};
///
/// let request = ScheduleRequest::new("7A", CalendarTemplate::standard_week("std"))
///     .with_obligation(TeachingObligation::new("T1", "7A", "MATH", 5))
///     .with_obligation(TeachingObligation::new("T2", "7A", "SCI", 3));
///
/// let generator = TimetableGenerator::default();
/// let result = generator.generate(&request, &mut SmallRng::seed_from_u64(42));
/// assert_eq!(result.placement_count(), 8);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    config: GeneratorConfig,
}

impl TimetableGenerator {
    /// Creates a generator with the given configuration.
    ///
    /// The configuration is validated first, so a generator never runs
    /// with an empty or repeated working-day list.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Schedules one class with no other classes' teacher bookings.
    pub fn generate<R: Rng>(&self, request: &ScheduleRequest, rng: &mut R) -> ScheduleResult {
        self.generate_with_occupancy(request, TeacherOccupancy::new(), rng).0
    }

    /// Schedules one class using the random source from the configured seed.
    pub fn generate_seeded(&self, request: &ScheduleRequest) -> ScheduleResult {
        self.generate(request, &mut self.config.rng())
    }

    /// Schedules one class on top of existing teacher bookings.
    ///
    /// Returns the result and the occupancy extended with this class's
    /// lessons, ready for the next class.
    pub fn generate_with_occupancy<R: Rng>(
        &self,
        request: &ScheduleRequest,
        occupancy: TeacherOccupancy,
        rng: &mut R,
    ) -> (ScheduleResult, TeacherOccupancy) {
        let obligations: Vec<TeachingObligation> = request
            .obligations
            .iter()
            .filter(|o| o.class_id == request.class_id)
            .cloned()
            .collect();
        let skipped = request.obligations.len() - obligations.len();
        if skipped > 0 {
            debug!(
                class = %request.class_id,
                skipped,
                "ignoring obligations of other classes"
            );
        }

        let week = WeekSlots::expand(&request.template, &self.config.working_days);
        let tasks = build_tasks(&obligations);
        info!(
            class = %request.class_id,
            template = %request.template.name,
            tasks = tasks.len(),
            slots = week.total_slots(),
            "timetable run started"
        );

        let mut tracker = ConflictTracker::new(
            week.days(),
            &obligations,
            &self.config.subject_cap,
            occupancy,
        );

        let (mut placements, leftovers) = GreedyPlacer::new(&week).run(&tasks, &mut tracker, rng);
        let (repaired, conflicts) = RepairPlacer::new(&week).run(&leftovers, &mut tracker, rng);
        placements.extend(repaired);

        let result = ScheduleResult {
            class_id: request.class_id.clone(),
            placements,
            conflicts,
        };
        info!(
            class = %result.class_id,
            placed = result.placement_count(),
            conflicts = result.conflict_count(),
            "timetable run finished"
        );
        (result, tracker.into_teacher_occupancy())
    }

    /// Schedules several classes one after another, sharing teacher
    /// occupancy so no teacher is booked twice at the same time.
    pub fn generate_all<R: Rng>(
        &self,
        requests: &[ScheduleRequest],
        rng: &mut R,
    ) -> Vec<ScheduleResult> {
        let mut occupancy = TeacherOccupancy::new();
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            let (result, next) = self.generate_with_occupancy(request, occupancy, rng);
            occupancy = next;
            results.push(result);
        }
        results
    }

    /// Resolves inputs through the collaborators, then schedules the class.
    pub fn generate_from_sources<R, O, C>(
        &self,
        class_id: &str,
        template_id: &str,
        obligations: &O,
        calendars: &C,
        rng: &mut R,
    ) -> Result<ScheduleResult>
    where
        R: Rng,
        O: ObligationSource + ?Sized,
        C: CalendarSource + ?Sized,
    {
        let template = calendars
            .template(template_id)
            .ok_or_else(|| TimetableError::TemplateNotFound(template_id.to_string()))?;
        let request = ScheduleRequest::new(class_id, template)
            .with_obligations(obligations.obligations_for_class(class_id));
        Ok(self.generate(&request, rng))
    }
}
