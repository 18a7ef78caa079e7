//! Teacher repairs: double-booked teachers and ineligible teachers.

use log::trace;

use super::common::{find_free_slot, find_free_teacher};
use crate::constraints::grouping;
use crate::models::{Assignment, Catalog};

/// Resolves teacher double-bookings.
///
/// Every assignment after the first in a (slot, teacher) group first tries
/// another eligible teacher free at that slot, then a slot where its
/// teacher and students are both free (same day first). If any of them
/// could not move, the group's first assignment is moved instead.
pub(crate) fn fix_conflicts(catalog: &Catalog, assignments: &mut [Assignment]) {
    for group in grouping::by_slot_and_teacher(assignments) {
        let mut stuck = false;

        for &index in group.iter().skip(1) {
            if let Some(teacher) = find_free_teacher(assignments, index) {
                trace!(
                    "teachers: {} handed from {} to {}",
                    assignments[index].class().name,
                    assignments[index].teacher,
                    teacher
                );
                assignments[index].teacher = teacher;
            } else if !relocate(catalog, assignments, index) {
                stuck = true;
            }
        }

        if stuck {
            if let Some(&first) = group.first() {
                relocate(catalog, assignments, first);
            }
        }
    }
}

/// Gives every assignment taught by an ineligible teacher an eligible one,
/// free at the slot if possible.
pub(crate) fn requalify(assignments: &mut [Assignment]) {
    for index in 0..assignments.len() {
        if assignments[index].has_eligible_teacher() {
            continue;
        }
        let replacement = find_free_teacher(assignments, index)
            .or_else(|| assignments[index].class_type().teachers.first().cloned());
        if let Some(teacher) = replacement {
            assignments[index].teacher = teacher;
        }
    }
}

fn relocate(catalog: &Catalog, assignments: &mut [Assignment], index: usize) -> bool {
    let day = assignments[index].time_slot.day();
    match find_free_slot(catalog, assignments, index, Some(day), |_| true) {
        Some(slot) => {
            trace!(
                "teachers: {} moved from {} to {}",
                assignments[index].class().name,
                assignments[index].time_slot,
                slot
            );
            assignments[index].time_slot = slot;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::hard;
    use crate::fixtures::{self, AssignmentBuilder};
    use crate::models::Day;

    #[test]
    fn test_conflict_hands_over_to_free_teacher() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(0, "T1", 0, Day::Monday, 8, 0, 60),
            b.at(1, "T1", 1, Day::Monday, 8, 0, 60),
        ];
        assert_eq!(hard::teacher_conflict(&list), 1);

        fix_conflicts(&catalog, &mut list);
        assert_eq!(hard::teacher_conflict(&list), 0);
        assert_eq!(&*list[1].teacher, "T2");
        assert_eq!(list[1].time_slot, fixtures::slot(Day::Monday, 8, 0, 60));
    }

    #[test]
    fn test_conflict_moves_when_no_teacher_free() {
        let catalog = fixtures::load_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(0, "T1", 3, Day::Monday, 8, 0, 60),
            b.at(1, "T1", 4, Day::Monday, 8, 0, 60),
        ];
        fix_conflicts(&catalog, &mut list);

        assert_eq!(hard::teacher_conflict(&list), 0);
        assert_eq!(&*list[1].teacher, "T1");
        assert_eq!(list[1].time_slot, fixtures::slot(Day::Monday, 9, 0, 60));
    }

    #[test]
    fn test_requalify_picks_free_eligible_teacher() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(0, "T2", 0, Day::Monday, 8, 0, 60),
            b.at(2, "T1", 3, Day::Monday, 8, 0, 60),
        ];
        assert_eq!(hard::unqualified_teacher(&list), 1);

        requalify(&mut list);
        assert_eq!(hard::unqualified_teacher(&list), 0);
        assert_eq!(&*list[1].teacher, "T3");
    }
}
