//! Constraint identifiers and their static weights.

use std::fmt;

/// Every constraint the kernel evaluates.
///
/// Weight and description are fixed per variant. [`ConstraintKind::ALL`]
/// lists the variants in evaluation order; the correction module visits
/// violated constraints in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintKind {
    AssignmentLoad,
    TeacherConflict,
    StudentsLunchBreak,
    StudentsDinnerBreak,
    TeachersLunchBreak,
    TeachersDinnerBreak,
    TeachersMax8HoursDay,
    StudentsMax8HoursDay,
    RoomCapacityExceeded,
    RoomConflict,
    UnqualifiedTeacher,
    StudentGaps,
    IncorrectOrderOfClasses,
    OutOfDepartmentRoomUsage,
    PreferredRoomType,
    StudentsMin3HoursDay,
    ContinuousClassGaps,
    ContinuousClassDifferentTeachers,
    ContinuousClassDifferentRooms,
    MultipleAssignmentsInSameTimeSlot,
}

impl ConstraintKind {
    /// All constraints in evaluation order: hard first, then soft.
    pub const ALL: [ConstraintKind; 20] = [
        ConstraintKind::AssignmentLoad,
        ConstraintKind::TeacherConflict,
        ConstraintKind::StudentsLunchBreak,
        ConstraintKind::StudentsDinnerBreak,
        ConstraintKind::TeachersLunchBreak,
        ConstraintKind::TeachersDinnerBreak,
        ConstraintKind::TeachersMax8HoursDay,
        ConstraintKind::StudentsMax8HoursDay,
        ConstraintKind::RoomCapacityExceeded,
        ConstraintKind::RoomConflict,
        ConstraintKind::UnqualifiedTeacher,
        ConstraintKind::StudentGaps,
        ConstraintKind::IncorrectOrderOfClasses,
        ConstraintKind::OutOfDepartmentRoomUsage,
        ConstraintKind::PreferredRoomType,
        ConstraintKind::StudentsMin3HoursDay,
        ConstraintKind::ContinuousClassGaps,
        ConstraintKind::ContinuousClassDifferentTeachers,
        ConstraintKind::ContinuousClassDifferentRooms,
        ConstraintKind::MultipleAssignmentsInSameTimeSlot,
    ];

    /// Multiplier applied to this constraint's violation count in the score.
    pub const fn weight(self) -> u32 {
        match self {
            ConstraintKind::AssignmentLoad
            | ConstraintKind::TeacherConflict
            | ConstraintKind::RoomConflict
            | ConstraintKind::RoomCapacityExceeded => 9,
            ConstraintKind::TeachersMax8HoursDay | ConstraintKind::StudentsMax8HoursDay => 8,
            ConstraintKind::StudentsLunchBreak
            | ConstraintKind::StudentsDinnerBreak
            | ConstraintKind::MultipleAssignmentsInSameTimeSlot => 7,
            ConstraintKind::TeachersLunchBreak
            | ConstraintKind::TeachersDinnerBreak
            | ConstraintKind::UnqualifiedTeacher => 6,
            ConstraintKind::ContinuousClassGaps
            | ConstraintKind::ContinuousClassDifferentTeachers
            | ConstraintKind::ContinuousClassDifferentRooms => 5,
            ConstraintKind::PreferredRoomType => 3,
            ConstraintKind::IncorrectOrderOfClasses
            | ConstraintKind::OutOfDepartmentRoomUsage
            | ConstraintKind::StudentsMin3HoursDay => 2,
            ConstraintKind::StudentGaps => 1,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ConstraintKind::AssignmentLoad => "Assignment Load Violation",
            ConstraintKind::TeacherConflict => "Teacher Conflict",
            ConstraintKind::StudentsLunchBreak => "Students Lunch Break",
            ConstraintKind::StudentsDinnerBreak => "Students Dinner Break",
            ConstraintKind::TeachersLunchBreak => "Teachers Lunch Break",
            ConstraintKind::TeachersDinnerBreak => "Teachers Dinner Break",
            ConstraintKind::TeachersMax8HoursDay => "Teachers Max 8 Hours Day",
            ConstraintKind::StudentsMax8HoursDay => "Students Max 8 Hours Day",
            ConstraintKind::RoomCapacityExceeded => "Room Capacity Exceeded",
            ConstraintKind::RoomConflict => "Room Conflict",
            ConstraintKind::UnqualifiedTeacher => "Unqualified Teacher",
            ConstraintKind::StudentGaps => "Student Gaps",
            ConstraintKind::IncorrectOrderOfClasses => "Incorrect Order Of Classes",
            ConstraintKind::OutOfDepartmentRoomUsage => "Out Of Department Room Usage",
            ConstraintKind::PreferredRoomType => "Preferred Room Type",
            ConstraintKind::StudentsMin3HoursDay => "Students Min 3 Hours Day",
            ConstraintKind::ContinuousClassGaps => "Continuous Class Gaps",
            ConstraintKind::ContinuousClassDifferentTeachers => {
                "Continuous Class Different Teachers"
            }
            ConstraintKind::ContinuousClassDifferentRooms => "Continuous Class Different Rooms",
            ConstraintKind::MultipleAssignmentsInSameTimeSlot => {
                "Multiple Assignments In Same Time Slot"
            }
        }
    }

    /// Whether this is a feasibility (hard) constraint.
    pub const fn is_hard(self) -> bool {
        matches!(
            self,
            ConstraintKind::AssignmentLoad
                | ConstraintKind::TeacherConflict
                | ConstraintKind::RoomConflict
                | ConstraintKind::RoomCapacityExceeded
                | ConstraintKind::StudentsLunchBreak
                | ConstraintKind::StudentsDinnerBreak
                | ConstraintKind::TeachersLunchBreak
                | ConstraintKind::TeachersDinnerBreak
                | ConstraintKind::TeachersMax8HoursDay
                | ConstraintKind::StudentsMax8HoursDay
                | ConstraintKind::UnqualifiedTeacher
        )
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_weights_in_range() {
        for kind in ConstraintKind::ALL {
            if kind.is_hard() {
                assert!((6..=9).contains(&kind.weight()), "{kind}");
            }
        }
    }

    #[test]
    fn test_soft_weights() {
        assert_eq!(ConstraintKind::StudentGaps.weight(), 1);
        assert_eq!(ConstraintKind::PreferredRoomType.weight(), 3);
        assert_eq!(ConstraintKind::ContinuousClassGaps.weight(), 5);
        assert!(!ConstraintKind::StudentGaps.is_hard());
    }

    #[test]
    fn test_all_is_unique() {
        let mut kinds = ConstraintKind::ALL.to_vec();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), ConstraintKind::ALL.len());
    }
}
