//! Weekly class timetabling by metaheuristic search.
//!
//! Searches for a teacher, room and time slot for every class session of an
//! academic term, minimizing a weighted count of constraint violations:
//!
//! - **Constraint kernel** ([`constraints`]): pure evaluators that turn a
//!   candidate timetable into a per-constraint violation profile and a
//!   weighted scalar score (lower is better).
//! - **Genetic search** ([`ga`]): population-based evolution with truncation
//!   selection and single-point crossover.
//! - **Swarm search** ([`swarm`]): particles perturbed by per-field
//!   resampling, tracking personal and global bests.
//! - **Correction** ([`correction`]): targeted repair heuristics for specific
//!   constraint violations, usable standalone or from inside the engines.
//!
//! # Architecture
//!
//! The search engines are generic over their problem traits
//! ([`ga::GaProblem`], [`swarm::SwarmProblem`]); [`TimetableProblem`] is the
//! bridge that plugs the timetable domain into both. The static
//! [`models::Catalog`] (subjects, rooms, time slots) is shared read-only by
//! every candidate [`models::Schedule`] in a run.
//!
//! All randomness flows through one explicitly seeded generator per run,
//! so runs are reproducible for a fixed seed.

pub mod constraints;
pub mod correction;
pub mod error;
pub mod ga;
pub mod models;
mod problem;
mod random;
pub mod statistics;
pub mod swarm;
pub mod telemetry;

pub use problem::TimetableProblem;

#[cfg(test)]
pub(crate) mod fixtures;
