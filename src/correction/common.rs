//! Availability checks and searches shared by the repairs.

use std::sync::Arc;

use crate::constraints::grouping;
use crate::models::{Assignment, Catalog, Day, Room, TimeSlot};

/// Whose day a daily repair is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Audience {
    Students,
    Teachers,
}

impl Audience {
    pub(crate) fn groups(self, assignments: &[Assignment]) -> Vec<Vec<usize>> {
        match self {
            Audience::Students => grouping::students_by_day(assignments),
            Audience::Teachers => grouping::teachers_by_day(assignments),
        }
    }
}

/// Whether `teacher` has no session overlapping `slot`, ignoring `skip`.
pub(crate) fn teacher_free(
    assignments: &[Assignment],
    teacher: &str,
    slot: &TimeSlot,
    skip: usize,
) -> bool {
    !assignments
        .iter()
        .enumerate()
        .any(|(j, a)| j != skip && &*a.teacher == teacher && a.time_slot.overlaps(slot))
}

/// Whether `room` hosts no session overlapping `slot`, ignoring `skip`.
pub(crate) fn room_free(
    assignments: &[Assignment],
    room: &Room,
    slot: &TimeSlot,
    skip: usize,
) -> bool {
    !assignments
        .iter()
        .enumerate()
        .any(|(j, a)| j != skip && *a.room == *room && a.time_slot.overlaps(slot))
}

/// Whether the students of `assignments[index]` have no other session
/// overlapping `slot`.
pub(crate) fn students_free(assignments: &[Assignment], index: usize, slot: &TimeSlot) -> bool {
    let target = &assignments[index];
    !assignments
        .iter()
        .enumerate()
        .any(|(j, a)| j != index && a.time_slot.overlaps(slot) && a.shares_students(target))
}

/// An eligible teacher, other than the current one, free at the
/// assignment's slot.
pub(crate) fn find_free_teacher(assignments: &[Assignment], index: usize) -> Option<Arc<str>> {
    let a = &assignments[index];
    a.class_type()
        .teachers
        .iter()
        .find(|t| **t != a.teacher && teacher_free(assignments, t, &a.time_slot, index))
        .cloned()
}

/// The first catalog slot, other than the current one, where both the
/// teacher and the students of `assignments[index]` are free.
///
/// Slots on `prefer_day` are tried first. `accept` filters candidates.
pub(crate) fn find_free_slot<F>(
    catalog: &Catalog,
    assignments: &[Assignment],
    index: usize,
    prefer_day: Option<Day>,
    accept: F,
) -> Option<TimeSlot>
where
    F: Fn(&TimeSlot) -> bool,
{
    let a = &assignments[index];
    let usable = |slot: &&TimeSlot| {
        **slot != a.time_slot
            && accept(*slot)
            && teacher_free(assignments, &a.teacher, *slot, index)
            && students_free(assignments, index, *slot)
    };

    let preferred = prefer_day.and_then(|day| {
        catalog
            .time_slots()
            .iter()
            .filter(|s| s.day() == day)
            .find(&usable)
    });
    preferred
        .or_else(|| catalog.time_slots().iter().find(&usable))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, AssignmentBuilder};

    #[test]
    fn test_find_free_teacher_skips_busy() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let list = vec![
            b.at(2, "T2", 3, Day::Monday, 8, 0, 60),
            b.at(6, "T3", 1, Day::Monday, 8, 0, 60),
        ];
        // T3 is the only alternative for the lab and is busy
        assert_eq!(find_free_teacher(&list, 0), None);

        let list = vec![b.at(2, "T2", 3, Day::Monday, 8, 0, 60)];
        assert_eq!(find_free_teacher(&list, 0).as_deref(), Some("T3"));
    }

    #[test]
    fn test_find_free_slot_prefers_same_day() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let list = vec![
            b.at(2, "T2", 3, Day::Wednesday, 8, 0, 60),
            b.at(3, "T2", 3, Day::Wednesday, 9, 0, 60),
        ];
        let slot = find_free_slot(&catalog, &list, 0, Some(Day::Wednesday), |_| true).unwrap();
        assert_eq!(slot, fixtures::slot(Day::Wednesday, 10, 0, 60));

        let slot = find_free_slot(&catalog, &list, 0, None, |s| s.day() != Day::Wednesday).unwrap();
        assert_eq!(slot, fixtures::slot(Day::Monday, 8, 0, 60));
    }

    #[test]
    fn test_students_free_checks_shared_letters() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let list = vec![
            b.at(0, "T1", 0, Day::Monday, 8, 0, 60),
            b.at(4, "T3", 3, Day::Tuesday, 8, 0, 60),
        ];
        // the lecture covers group B, so B's lab cannot move to Monday 08:00
        let monday = fixtures::slot(Day::Monday, 8, 0, 60);
        assert!(!students_free(&list, 1, &monday));
        assert!(students_free(&list, 1, &fixtures::slot(Day::Monday, 9, 0, 60)));
    }
}
