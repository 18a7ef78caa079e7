//! Core trait definitions for the GA framework.
//!
//! [`Individual`] and [`GaProblem`] form the contract between the generic
//! evolutionary loop and a concrete problem such as
//! [`TimetableProblem`](crate::TimetableProblem).

use rand::Rng;

/// Marker trait for fitness values.
///
/// Lower fitness is considered better (minimization).
///
/// Built-in implementations exist for `u64` (weighted violation scores)
/// and `f64`.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Used for unevaluated individuals.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for logging and telemetry.
    fn to_f64(self) -> f64;
}

impl Fitness for u64 {
    fn worst() -> Self {
        u64::MAX
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// A candidate solution that carries its own fitness.
///
/// The engines call the problem's `evaluate` to compute fitness, then store
/// it via [`set_fitness`](Individual::set_fitness).
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the current fitness of this individual.
    fn fitness(&self) -> Self::Fitness;

    /// Sets the fitness of this individual.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines a GA optimization problem.
///
/// 1. **Initialization**: how to create random individuals
/// 2. **Evaluation**: how to compute fitness
/// 3. **Crossover**: how to recombine two parents
/// 4. **Mutation**: how to perturb an individual
/// 5. **Repair**: an optional heuristic fix applied now and then
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel using rayon.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness.
    ///
    /// This is typically the most expensive operation and may run in
    /// parallel across the population.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Produces offspring by recombining two parents.
    ///
    /// Returns a `Vec` of 1 or 2 children. The default implementation clones
    /// parent1 (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone()]
    }

    /// Mutates an individual in place. The default is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Repairs an individual in place. The default is a no-op.
    fn repair<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}
}
