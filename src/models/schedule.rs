//! Candidate timetables.

use rand::Rng;

use super::assignment::Assignment;
use super::catalog::Catalog;

/// A complete candidate timetable and its weighted score.
///
/// Lower fitness is better. A freshly built schedule carries
/// [`Schedule::UNEVALUATED`] until a search engine or caller scores it.
///
/// Cloning copies every assignment; catalog values inside an assignment are
/// immutable, so edits to a clone never reach the source.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub assignments: Vec<Assignment>,
    pub fitness: u64,
}

impl Schedule {
    /// Sentinel fitness of an unevaluated schedule (the worst score).
    pub const UNEVALUATED: u64 = u64::MAX;

    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self::with_fitness(assignments, Self::UNEVALUATED)
    }

    pub fn with_fitness(assignments: Vec<Assignment>, fitness: u64) -> Self {
        Self {
            assignments,
            fitness,
        }
    }

    /// Builds one assignment per required session, drawing teacher, room
    /// and slot uniformly at random.
    pub fn random<R: Rng>(catalog: &Catalog, rng: &mut R) -> Self {
        let assignments = catalog
            .sessions()
            .iter()
            .map(|session| catalog.random_assignment(session.clone(), rng))
            .collect();
        Self::new(assignments)
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness != Self::UNEVALUATED
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
