//! Weighted evaluation of a timetable.

use std::fmt;
use std::sync::Arc;

use super::hard;
use super::kind::ConstraintKind;
use super::rules::{DINNER, LUNCH};
use super::soft;
use crate::models::{Assignment, Catalog, Subject};

type EvalFn = dyn Fn(&[Assignment]) -> u32 + Send + Sync;

/// A named rule with a uniform `assignments -> count` evaluator.
///
/// Rules that need more context than the assignments (such as the load
/// check, which needs the subject list) capture it when built.
pub struct Constraint {
    kind: ConstraintKind,
    eval: Box<EvalFn>,
}

impl Constraint {
    pub fn new<F>(kind: ConstraintKind, eval: F) -> Self
    where
        F: Fn(&[Assignment]) -> u32 + Send + Sync + 'static,
    {
        Self {
            kind,
            eval: Box::new(eval),
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn weight(&self) -> u32 {
        self.kind.weight()
    }

    pub fn evaluate(&self, assignments: &[Assignment]) -> u32 {
        (self.eval)(assignments)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("kind", &self.kind)
            .field("weight", &self.weight())
            .finish()
    }
}

/// Violation count per constraint, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViolationProfile {
    entries: Vec<(ConstraintKind, u32)>,
}

impl ViolationProfile {
    /// Count for `kind`, zero if it was not evaluated.
    pub fn get(&self, kind: ConstraintKind) -> u32 {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |&(_, count)| count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstraintKind, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Constraints with at least one violation, in evaluation order.
    pub fn violated(&self) -> impl Iterator<Item = (ConstraintKind, u32)> + '_ {
        self.iter().filter(|&(_, count)| count > 0)
    }

    /// Unweighted total.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, c)| u64::from(c)).sum()
    }

    /// Weighted total; lower is better.
    pub fn score(&self) -> u64 {
        self.entries
            .iter()
            .map(|&(k, c)| u64::from(k.weight()) * u64::from(c))
            .sum()
    }

    /// True when no hard constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.violated().all(|(k, _)| !k.is_hard())
    }
}

/// The constraint kernel: evaluates timetables against a fixed rule set.
///
/// Evaluation is pure and deterministic, so one evaluator can be shared
/// across threads scoring different candidates.
#[derive(Debug)]
pub struct Evaluator {
    constraints: Vec<Constraint>,
}

impl Evaluator {
    /// Every built-in constraint, in [`ConstraintKind::ALL`] order.
    pub fn standard(catalog: &Catalog) -> Self {
        let subjects: Vec<Arc<Subject>> = catalog.subjects().to_vec();
        let constraints = ConstraintKind::ALL
            .iter()
            .map(|&kind| builtin(kind, &subjects))
            .collect();
        Self { constraints }
    }

    pub fn with_constraints(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn evaluate(&self, assignments: &[Assignment]) -> ViolationProfile {
        ViolationProfile {
            entries: self
                .constraints
                .iter()
                .map(|c| (c.kind(), c.evaluate(assignments)))
                .collect(),
        }
    }

    /// Weighted sum of violations.
    pub fn score(&self, assignments: &[Assignment]) -> u64 {
        self.constraints
            .iter()
            .map(|c| u64::from(c.weight()) * u64::from(c.evaluate(assignments)))
            .sum()
    }

    /// Unweighted number of violations.
    pub fn count_violations(&self, assignments: &[Assignment]) -> u64 {
        self.constraints
            .iter()
            .map(|c| u64::from(c.evaluate(assignments)))
            .sum()
    }
}

fn builtin(kind: ConstraintKind, subjects: &[Arc<Subject>]) -> Constraint {
    use ConstraintKind::*;
    match kind {
        AssignmentLoad => {
            let subjects = subjects.to_vec();
            Constraint::new(kind, move |a| hard::assignment_load(&subjects, a))
        }
        TeacherConflict => Constraint::new(kind, hard::teacher_conflict),
        StudentsLunchBreak => Constraint::new(kind, |a| hard::students_meal_break(a, LUNCH)),
        StudentsDinnerBreak => Constraint::new(kind, |a| hard::students_meal_break(a, DINNER)),
        TeachersLunchBreak => Constraint::new(kind, |a| hard::teachers_meal_break(a, LUNCH)),
        TeachersDinnerBreak => Constraint::new(kind, |a| hard::teachers_meal_break(a, DINNER)),
        TeachersMax8HoursDay => Constraint::new(kind, hard::teachers_max_daily),
        StudentsMax8HoursDay => Constraint::new(kind, hard::students_max_daily),
        RoomCapacityExceeded => Constraint::new(kind, hard::room_capacity_exceeded),
        RoomConflict => Constraint::new(kind, hard::room_conflict),
        UnqualifiedTeacher => Constraint::new(kind, hard::unqualified_teacher),
        StudentGaps => Constraint::new(kind, soft::student_gaps),
        IncorrectOrderOfClasses => Constraint::new(kind, soft::incorrect_order),
        OutOfDepartmentRoomUsage => Constraint::new(kind, soft::out_of_department_room),
        PreferredRoomType => Constraint::new(kind, soft::preferred_room_type),
        StudentsMin3HoursDay => Constraint::new(kind, soft::students_min_daily),
        ContinuousClassGaps => Constraint::new(kind, soft::continuous_class_gaps),
        ContinuousClassDifferentTeachers => Constraint::new(kind, soft::continuous_class_teachers),
        ContinuousClassDifferentRooms => Constraint::new(kind, soft::continuous_class_rooms),
        MultipleAssignmentsInSameTimeSlot => Constraint::new(kind, soft::multiple_assignments),
    }
}
