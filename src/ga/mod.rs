//! Genetic Algorithm framework.
//!
//! A generic GA built on trait-based abstractions. A problem plugs in by
//! implementing [`GaProblem`], which specifies how to create, evaluate,
//! recombine, mutate and repair individuals.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with associated fitness type
//! - [`GaProblem`]: Problem definition: initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, presets)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final result with fitness history and telemetry
//!
//! # Selection
//!
//! Truncation: the better half of each generation survives, and the
//! population is refilled by crossover between uniformly chosen survivors.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use types::{Fitness, GaProblem, Individual};
