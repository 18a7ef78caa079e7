//! Swarm search.
//!
//! A population of particles, each holding a current solution and its
//! personal best, with one global best across the swarm. Particles move by
//! independent per-field resampling at a fixed probability rather than by
//! position/velocity updates, so the search behaves like a parallel set of
//! random walks that remember their best points.
//!
//! # Key Types
//!
//! - [`SwarmProblem`]: solution creation, evaluation, perturbation, repair
//! - [`Particle`]: current position and personal best
//! - [`SwarmConfig`]: swarm size, iterations, resampling probability
//! - [`SwarmRunner`] / [`SwarmResult`]

mod config;
mod runner;
mod types;

pub use config::SwarmConfig;
pub use runner::{SwarmResult, SwarmRunner};
pub use types::{Particle, SwarmProblem};
