//! Domain model.
//!
//! Catalog values ([`Subject`], [`Room`], [`TimeSlot`]) are immutable and
//! shared through `Arc` or copied; a [`Schedule`] owns its [`Assignment`]s
//! outright, so no edit to one candidate can leak into another or into the
//! [`Catalog`].

mod assignment;
mod catalog;
mod record;
mod room;
mod schedule;
mod subject;
mod time_slot;

pub use assignment::{Assignment, Session};
pub use catalog::{slot_grid, Catalog};
pub use record::{AssignmentRecord, ScheduleRecord};
pub use room::{Room, RoomKinds};
pub use schedule::Schedule;
pub use subject::{Class, ClassFormat, ClassType, ClassTypeSpec, Course, Subject};
pub use time_slot::{clock, Day, TimeOfDay, TimeSlot};
