//! The timetable domain plugged into both search engines.

use rand::Rng;

use crate::constraints::Evaluator;
use crate::correction::CorrectionModule;
use crate::ga::{GaProblem, Individual};
use crate::models::{Assignment, Catalog, Schedule};
use crate::swarm::SwarmProblem;

impl Individual for Schedule {
    type Fitness = u64;

    fn fitness(&self) -> u64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: u64) {
        self.fitness = fitness;
    }
}

/// Searches timetables for one catalog.
///
/// Every candidate has one assignment per session of the catalog; only the
/// teacher, room and time slot of each assignment vary. Fitness is the
/// evaluator's weighted score, and repair runs the [`CorrectionModule`].
///
/// ```ignore
/// let problem = TimetableProblem::new(&catalog);
/// let ga = GaRunner::run(&problem, &GaConfig::default().with_seed(1));
/// let swarm = SwarmRunner::run(&problem, &SwarmConfig::default().with_seed(1));
/// ```
#[derive(Debug)]
pub struct TimetableProblem<'a> {
    catalog: &'a Catalog,
    evaluator: Evaluator,
}

impl<'a> TimetableProblem<'a> {
    /// A problem scored by every built-in constraint.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_evaluator(catalog, Evaluator::standard(catalog))
    }

    /// A problem scored by a custom constraint set.
    pub fn with_evaluator(catalog: &'a Catalog, evaluator: Evaluator) -> Self {
        Self { catalog, evaluator }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// The repairs used by the engines' correction step.
    pub fn corrections(&self) -> CorrectionModule<'_> {
        CorrectionModule::new(self.catalog, &self.evaluator)
    }

    /// Scores `schedule` in place and returns the score.
    pub fn score(&self, schedule: &mut Schedule) -> u64 {
        schedule.fitness = self.evaluator.score(&schedule.assignments);
        schedule.fitness
    }

    fn redraw<R: Rng>(&self, assignment: &mut Assignment, probability: f64, rng: &mut R) {
        if rng.random_bool(probability) {
            assignment.teacher = self.catalog.random_teacher(assignment.class_type(), rng);
        }
        if rng.random_bool(probability) {
            assignment.room = self.catalog.random_room(rng);
        }
        if rng.random_bool(probability) {
            assignment.time_slot = self.catalog.random_slot(rng);
        }
    }

    fn correct<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        self.corrections().apply(&mut schedule.assignments, rng);
        schedule.fitness = Schedule::UNEVALUATED;
    }
}

impl GaProblem for TimetableProblem<'_> {
    type Individual = Schedule;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Schedule {
        Schedule::random(self.catalog, rng)
    }

    fn evaluate(&self, schedule: &Schedule) -> u64 {
        self.evaluator.score(&schedule.assignments)
    }

    /// Single-point crossover: the first `k` assignments of `parent1`
    /// followed by the rest of `parent2`, for a random cut `k`.
    fn crossover<R: Rng>(
        &self,
        parent1: &Schedule,
        parent2: &Schedule,
        rng: &mut R,
    ) -> Vec<Schedule> {
        let cut = rng.random_range(0..=parent1.len().min(parent2.len()));
        let mut assignments = Vec::with_capacity(parent2.len());
        assignments.extend_from_slice(&parent1.assignments[..cut]);
        assignments.extend_from_slice(&parent2.assignments[cut..]);
        vec![Schedule::new(assignments)]
    }

    /// Redraws teacher, room and slot of one random assignment.
    fn mutate<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        if schedule.is_empty() {
            return;
        }
        let index = rng.random_range(0..schedule.len());
        self.redraw(&mut schedule.assignments[index], 1.0, rng);
        schedule.fitness = Schedule::UNEVALUATED;
    }

    fn repair<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        self.correct(schedule, rng);
    }
}

impl SwarmProblem for TimetableProblem<'_> {
    type Solution = Schedule;

    fn create_solution<R: Rng>(&self, rng: &mut R) -> Schedule {
        Schedule::random(self.catalog, rng)
    }

    fn evaluate(&self, schedule: &Schedule) -> u64 {
        self.evaluator.score(&schedule.assignments)
    }

    fn perturb<R: Rng>(&self, schedule: &mut Schedule, probability: f64, rng: &mut R) {
        for assignment in schedule.assignments.iter_mut() {
            self.redraw(assignment, probability, rng);
        }
        schedule.fitness = Schedule::UNEVALUATED;
    }

    fn repair<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        self.correct(schedule, rng);
    }
}
