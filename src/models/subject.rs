//! Curriculum model: courses, subjects, class types and class groups.
//!
//! A [`Subject`] is split into one [`ClassType`] per teaching format, and
//! each class type into the [`Class`] groups that attend its sessions.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::room::RoomKinds;

/// A curriculum: programme name, year and department.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    pub name: String,
    pub year: u32,
    pub department: String,
}

impl Course {
    pub fn new(name: impl Into<String>, year: u32, department: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            year,
            department: department.into(),
        }
    }
}

/// A class group: one or more lettered student groups taught together.
///
/// Equality is by name only, so two groups with the same name are
/// interchangeable regardless of membership.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Class {
    pub name: String,
    /// Number of students attending.
    pub students: u32,
    /// Single-letter group tags aggregated by this class.
    pub letters: Vec<char>,
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Teaching format of a class type.
///
/// The ordinal gives the canonical weekly order: lectures before seminars
/// before labs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassFormat {
    /// Theoretical lecture (`T`).
    Lecture,
    /// Theoretical-practical seminar (`TP`).
    Seminar,
    /// Tutorial or other format (`OT`).
    Other,
    /// Practical laboratory (`PL`).
    Lab,
}

impl ClassFormat {
    pub fn ordinal(self) -> u32 {
        match self {
            ClassFormat::Lecture => 0,
            ClassFormat::Seminar => 1,
            ClassFormat::Other => 2,
            ClassFormat::Lab => 3,
        }
    }

    /// Short code used in class names.
    pub fn code(self) -> &'static str {
        match self {
            ClassFormat::Lecture => "T",
            ClassFormat::Seminar => "TP",
            ClassFormat::Other => "OT",
            ClassFormat::Lab => "PL",
        }
    }

    /// How many lettered groups may share one session of this format.
    pub fn max_groups_per_session(self) -> usize {
        match self {
            ClassFormat::Lecture => 4,
            ClassFormat::Seminar => 2,
            ClassFormat::Other | ClassFormat::Lab => 1,
        }
    }
}

impl fmt::Display for ClassFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Configuration of one class type, before students are divided.
#[derive(Debug, Clone)]
pub struct ClassTypeSpec {
    pub format: ClassFormat,
    pub sessions_per_week: u32,
    pub teachers: Vec<String>,
    pub preferred_rooms: RoomKinds,
}

impl ClassTypeSpec {
    pub fn new(
        format: ClassFormat,
        sessions_per_week: u32,
        teachers: impl IntoIterator<Item = impl Into<String>>,
        preferred_rooms: RoomKinds,
    ) -> Self {
        Self {
            format,
            sessions_per_week,
            teachers: teachers.into_iter().map(Into::into).collect(),
            preferred_rooms,
        }
    }
}

/// One teaching format of a subject and the groups it must schedule.
#[derive(Debug, Clone)]
pub struct ClassType {
    pub format: ClassFormat,
    pub classes: Vec<Class>,
    /// Sessions each class group needs per week.
    pub sessions_per_week: u32,
    /// Teachers allowed to teach this class type.
    pub teachers: Vec<Arc<str>>,
    pub preferred_rooms: RoomKinds,
}

impl ClassType {
    /// Whether `teacher` is in the eligible-teacher list.
    pub fn is_eligible(&self, teacher: &str) -> bool {
        self.teachers.iter().any(|t| &**t == teacher)
    }
}

impl PartialEq for ClassType {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format && self.classes == other.classes
    }
}

impl Eq for ClassType {}

/// A subject of a course, with its class types.
#[derive(Debug, Clone)]
pub struct Subject {
    pub name: String,
    /// Total enrolled students.
    pub students: u32,
    pub department: String,
    pub course: Course,
    pub class_types: Vec<ClassType>,
}

impl Subject {
    /// Builds a subject, dividing `students` into class groups per format.
    ///
    /// Students are first split into `ceil(students / max_group_size)`
    /// lettered groups (`A`, `B`, ...). Letters are then combined into class
    /// groups of at most [`ClassFormat::max_groups_per_session`] letters, with
    /// the remainder going to the first groups.
    pub fn new(
        name: impl Into<String>,
        students: u32,
        department: impl Into<String>,
        course: Course,
        specs: Vec<ClassTypeSpec>,
        max_group_size: u32,
    ) -> Self {
        let name = name.into();
        let class_types = specs
            .into_iter()
            .map(|spec| ClassType {
                format: spec.format,
                classes: divide_classes(
                    &name,
                    spec.format,
                    students,
                    max_group_size,
                    spec.format.max_groups_per_session(),
                ),
                sessions_per_week: spec.sessions_per_week,
                teachers: spec.teachers.into_iter().map(Arc::from).collect(),
                preferred_rooms: spec.preferred_rooms,
            })
            .collect();

        Self {
            name,
            students,
            department: department.into(),
            course,
            class_types,
        }
    }

    /// Finds the class type of the given format.
    pub fn class_type(&self, format: ClassFormat) -> Option<(usize, &ClassType)> {
        self.class_types
            .iter()
            .enumerate()
            .find(|(_, ct)| ct.format == format)
    }
}

impl PartialEq for Subject {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.department == other.department
            && self.course == other.course
    }
}

impl Eq for Subject {}

impl Hash for Subject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.department.hash(state);
        self.course.hash(state);
    }
}

fn divide_classes(
    subject: &str,
    format: ClassFormat,
    students: u32,
    max_group_size: u32,
    max_per_session: usize,
) -> Vec<Class> {
    let letter_count = students.div_ceil(max_group_size.max(1)).clamp(1, 26) as usize;
    let letters: Vec<char> = ('A'..='Z').take(letter_count).collect();

    let group_count = letter_count.div_ceil(max_per_session.max(1));
    let base = letter_count / group_count;
    let extras = letter_count % group_count;
    let per_group = students.div_ceil(group_count as u32);

    let mut classes = Vec::with_capacity(group_count);
    let mut index = 0;
    for i in 0..group_count {
        let size = base + usize::from(i < extras);
        let group: Vec<char> = letters[index..index + size].to_vec();
        let tag: String = group.iter().collect();
        classes.push(Class {
            name: format!("{}_{}_{}", subject, format.code(), tag),
            students: per_group,
            letters: group,
        });
        index += size;
    }
    classes
}
