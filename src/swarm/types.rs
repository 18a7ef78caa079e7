//! Core trait and particle type for the swarm search.

use rand::Rng;

use crate::ga::Individual;

/// Defines a swarm search problem.
///
/// A solution is a fixed-shape set of components whose fields can be
/// resampled independently. The swarm framework handles personal and
/// global best tracking.
///
/// # Minimization
///
/// Lower fitness is better, as in the GA.
pub trait SwarmProblem: Send + Sync {
    /// The solution representation, carrying its own fitness.
    type Solution: Individual;

    /// Creates a random solution.
    fn create_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Evaluates a solution. May run in parallel across the swarm.
    fn evaluate(&self, solution: &Self::Solution) -> <Self::Solution as Individual>::Fitness;

    /// Resamples every field of every component of `solution`, each
    /// independently with `probability`.
    fn perturb<R: Rng>(&self, solution: &mut Self::Solution, probability: f64, rng: &mut R);

    /// Repairs a solution in place. The default is a no-op.
    fn repair<R: Rng>(&self, _solution: &mut Self::Solution, _rng: &mut R) {}
}

/// One member of the swarm: where it is now and the best place it has
/// been.
#[derive(Debug, Clone)]
pub struct Particle<S> {
    /// Current solution.
    pub position: S,
    /// Lowest-fitness solution this particle has visited.
    pub best: S,
}

impl<S: Individual> Particle<S> {
    /// A particle whose personal best is its evaluated starting position.
    pub fn new(position: S) -> Self {
        Self {
            best: position.clone(),
            position,
        }
    }

    /// Records the current position as personal best if it improves on it.
    /// Returns whether it did.
    pub fn update_best(&mut self) -> bool {
        if self.position.fitness() < self.best.fitness() {
            self.best = self.position.clone();
            true
        } else {
            false
        }
    }
}
