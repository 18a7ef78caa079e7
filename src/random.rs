//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the generator used for a whole run.
///
/// Every stochastic step of a run (initialization, mutation, crossover,
/// perturbation, correction) draws from the generator returned here.
pub(crate) fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Resolves an optional configured seed into a concrete one.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
