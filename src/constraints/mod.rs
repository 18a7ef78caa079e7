//! Constraint evaluation kernel.
//!
//! Turns a list of assignments into a [`ViolationProfile`] (one
//! non-negative count per [`ConstraintKind`]) and a weighted scalar score.
//!
//! # Hard constraints
//!
//! Teacher and room double-booking, room capacity, weekly load, lunch and
//! dinner breaks for students and teachers, the daily hour cap, and
//! teacher eligibility.
//!
//! # Soft constraints
//!
//! Student idle time, lecture/seminar/lab ordering, room department and
//! kind preferences, the daily hour floor, continuity of a class's
//! back-to-back sessions, and double-booked student groups.
//!
//! The building blocks ([`intervals`], [`grouping`], [`hard`], [`soft`]) are
//! public so the correction module and callers can reuse them.

mod evaluator;
pub mod grouping;
pub mod hard;
pub mod intervals;
mod kind;
pub mod rules;
pub mod soft;

pub use evaluator::{Constraint, Evaluator, ViolationProfile};
pub use kind::ConstraintKind;
