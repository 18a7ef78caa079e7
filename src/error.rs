//! Errors raised at the catalog and persistence boundaries.
//!
//! The constraint kernel, the correction module and the search engines are
//! total over catalog-valid input and never return errors.

use std::fmt;

use crate::models::ClassFormat;

/// Reasons a catalog cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no rooms to draw from.
    NoRooms,
    /// The catalog has no time slots to draw from.
    NoTimeSlots,
    /// A class type lists no eligible teachers.
    NoTeachers { subject: String, format: ClassFormat },
    /// A class type has no class groups to schedule.
    NoClasses { subject: String, format: ClassFormat },
    /// A slot grid would produce a slot ending at or before its start, or
    /// past midnight.
    InvalidTimeSlot { start: u16, end: u16 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NoRooms => write!(f, "catalog has no rooms"),
            CatalogError::NoTimeSlots => write!(f, "catalog has no time slots"),
            CatalogError::NoTeachers { subject, format } => {
                write!(f, "class type {} of {} has no eligible teachers", format, subject)
            }
            CatalogError::NoClasses { subject, format } => {
                write!(f, "class type {} of {} has no class groups", format, subject)
            }
            CatalogError::InvalidTimeSlot { start, end } => {
                write!(f, "invalid time slot [{}, {}) in minutes", start, end)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Reasons an exported schedule cannot be admitted back into a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    UnknownSubject(String),
    UnknownClassType { subject: String, format: ClassFormat },
    UnknownClass { subject: String, class: String },
    UnknownRoom(String),
    UnknownTimeSlot(String),
    /// The teacher is not eligible for any class type in the catalog.
    UnknownTeacher(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnknownSubject(name) => write!(f, "unknown subject: {}", name),
            ImportError::UnknownClassType { subject, format } => {
                write!(f, "subject {} has no class type {}", subject, format)
            }
            ImportError::UnknownClass { subject, class } => {
                write!(f, "subject {} has no class group {}", subject, class)
            }
            ImportError::UnknownRoom(name) => write!(f, "unknown room: {}", name),
            ImportError::UnknownTimeSlot(slot) => write!(f, "time slot not in catalog: {}", slot),
            ImportError::UnknownTeacher(name) => write!(f, "unknown teacher: {}", name),
        }
    }
}

impl std::error::Error for ImportError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CatalogError::NoTeachers {
            subject: "SBJ".into(),
            format: ClassFormat::Lab,
        };
        assert_eq!(err.to_string(), "class type PL of SBJ has no eligible teachers");
        assert_eq!(
            ImportError::UnknownRoom("999".into()).to_string(),
            "unknown room: 999"
        );
    }
}
