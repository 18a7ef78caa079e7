//! Plain-data form of a schedule for persistence.
//!
//! Records refer to catalog entries by name, so they can be written out and
//! read back by any storage layer. [`Catalog::import`](super::Catalog::import)
//! resolves the names and rejects dangling references.

use super::subject::ClassFormat;
use super::time_slot::Day;

/// One assignment, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentRecord {
    pub subject: String,
    pub department: String,
    pub format: ClassFormat,
    pub class: String,
    pub teacher: String,
    pub room: String,
    pub room_department: String,
    pub day: Day,
    /// Minutes since midnight.
    pub start: u16,
    /// Minutes since midnight.
    pub end: u16,
}

/// A schedule as `(assignments, fitness)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleRecord {
    pub assignments: Vec<AssignmentRecord>,
    pub fitness: u64,
}
