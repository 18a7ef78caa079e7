//! Scheduled sessions.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::room::Room;
use super::subject::{Class, ClassType, Subject};
use super::time_slot::TimeSlot;

/// The fixed identity of one session to schedule: a subject, one of its
/// class types, and one of that class type's groups.
///
/// A `Session` can only be built from indices that resolve inside its
/// subject, so every session is structurally valid.
#[derive(Debug, Clone)]
pub struct Session {
    subject: Arc<Subject>,
    class_type: usize,
    class: usize,
}

impl Session {
    /// Returns `None` if the class type or class index is out of range.
    pub fn new(subject: Arc<Subject>, class_type: usize, class: usize) -> Option<Self> {
        let ct = subject.class_types.get(class_type)?;
        ct.classes.get(class)?;
        Some(Self {
            subject,
            class_type,
            class,
        })
    }

    pub fn subject(&self) -> &Arc<Subject> {
        &self.subject
    }

    pub fn class_type(&self) -> &ClassType {
        &self.subject.class_types[self.class_type]
    }

    pub fn class(&self) -> &Class {
        &self.class_type().classes[self.class]
    }

    pub fn class_type_index(&self) -> usize {
        self.class_type
    }

    pub fn class_index(&self) -> usize {
        self.class
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.class_type == other.class_type
            && self.class == other.class
            && (Arc::ptr_eq(&self.subject, &other.subject) || *self.subject == *other.subject)
    }
}

impl Eq for Session {}

impl Hash for Session {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
        self.class_type.hash(state);
        self.class.hash(state);
    }
}

/// One scheduled session: a [`Session`] bound to a teacher, room and slot.
///
/// The session is fixed for the lifetime of a search; only the teacher,
/// room and time slot are decision variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub session: Session,
    pub teacher: Arc<str>,
    pub room: Arc<Room>,
    pub time_slot: TimeSlot,
}

impl Assignment {
    pub fn new(session: Session, teacher: Arc<str>, room: Arc<Room>, time_slot: TimeSlot) -> Self {
        Self {
            session,
            teacher,
            room,
            time_slot,
        }
    }

    pub fn subject(&self) -> &Subject {
        self.session.subject()
    }

    pub fn class_type(&self) -> &ClassType {
        self.session.class_type()
    }

    pub fn class(&self) -> &Class {
        self.session.class()
    }

    /// Whether the assigned teacher may teach this class type.
    pub fn has_eligible_teacher(&self) -> bool {
        self.class_type().is_eligible(&self.teacher)
    }

    /// Whether this session and `other` share a student group.
    ///
    /// Students are identified by course and group letter, so two sessions
    /// of different subjects in the same course can collide.
    pub fn shares_students(&self, other: &Assignment) -> bool {
        self.subject().course == other.subject().course
            && self
                .class()
                .letters
                .iter()
                .any(|l| other.class().letters.contains(l))
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} @ {} by {} in {}",
            self.subject().name,
            self.class_type().format,
            self.class().name,
            self.time_slot,
            self.teacher,
            self.room.name
        )
    }
}
