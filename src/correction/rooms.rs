//! Room repairs: double-booked rooms, undersized rooms and rooms of the
//! wrong department or kind.

use std::sync::Arc;

use log::trace;

use super::common::{find_free_slot, room_free};
use crate::constraints::grouping;
use crate::models::{Assignment, Catalog, Room, RoomKinds, TimeSlot};

/// Moves every assignment after the first out of each double-booked room.
///
/// Each one first looks for a free room at its slot, then for another slot
/// where its teacher, students and room are all free (same day first), and
/// finally takes the largest free room at its slot whatever the fit.
pub(crate) fn fix_conflicts(catalog: &Catalog, assignments: &mut [Assignment]) {
    for group in grouping::by_slot_and_room(assignments) {
        for &index in group.iter().skip(1) {
            let moved = improve(catalog, assignments, index, true)
                || relocate(catalog, assignments, index);
            if !moved {
                force(catalog, assignments, index);
            }
        }
    }
}

/// Re-rooms every assignment whose class does not fit its room.
pub(crate) fn fix_capacity(catalog: &Catalog, assignments: &mut [Assignment]) {
    let undersized: Vec<usize> = assignments
        .iter()
        .enumerate()
        .filter(|(_, a)| a.class().students > a.room.capacity)
        .map(|(i, _)| i)
        .collect();
    for index in undersized {
        improve(catalog, assignments, index, false);
    }
}

/// Re-rooms assignments held outside their department or in a room of a
/// kind their class type does not prefer.
pub(crate) fn improve_placement(catalog: &Catalog, assignments: &mut [Assignment]) {
    let misplaced: Vec<usize> = assignments
        .iter()
        .enumerate()
        .filter(|(_, a)| {
            !a.room.kinds.intersects(a.class_type().preferred_rooms)
                || a.room.department != a.subject().department
        })
        .map(|(i, _)| i)
        .collect();
    for index in misplaced {
        improve(catalog, assignments, index, false);
    }
}

/// How strictly a room must suit an assignment.
#[derive(Clone, Copy)]
enum Fit {
    /// Department and kind both match.
    Strict,
    /// Department or kind matches.
    Loose,
}

struct Need<'a> {
    students: u32,
    department: &'a str,
    kinds: RoomKinds,
}

impl Need<'_> {
    fn of(a: &Assignment) -> Need<'_> {
        Need {
            students: a.class().students,
            department: &a.subject().department,
            kinds: a.class_type().preferred_rooms,
        }
    }

    fn accepts(&self, room: &Room, fit: Fit) -> bool {
        let department = room.department == self.department;
        let kind = room.kinds.intersects(self.kinds);
        room.capacity >= self.students
            && match fit {
                Fit::Strict => department && kind,
                Fit::Loose => department || kind,
            }
    }
}

/// Searches a better room for `assignments[index]` at its current slot.
///
/// Tries, in order: a free room fitting strictly, a free room fitting
/// loosely, a swap with a same-time assignment whose room fits strictly,
/// then loosely, and for an undersized room any free room larger than the
/// current one (else the largest free room still too small). With `clash`
/// the current room is double-booked, so swaps are skipped: trading it
/// would only hand the clash to the partner. Returns whether the room
/// changed.
pub(crate) fn improve(
    catalog: &Catalog,
    assignments: &mut [Assignment],
    index: usize,
    clash: bool,
) -> bool {
    let target = &assignments[index];
    let slot = target.time_slot;
    let need = Need::of(target);
    let free = free_rooms(catalog, assignments, index);

    for fit in [Fit::Strict, Fit::Loose] {
        let pick = free
            .iter()
            .filter(|room| need.accepts(room, fit))
            .min_by_key(|room| room.capacity);
        if let Some(room) = pick {
            let room = Arc::clone(room);
            return reroom(assignments, index, room);
        }
    }

    if !clash {
        for fit in [Fit::Strict, Fit::Loose] {
            if let Some(partner) = swap_partner(assignments, index, fit) {
                trace!(
                    "rooms: swapping {} and {} at {}",
                    assignments[index].room.name,
                    assignments[partner].room.name,
                    slot
                );
                let mine = Arc::clone(&assignments[index].room);
                let theirs = std::mem::replace(&mut assignments[partner].room, mine);
                assignments[index].room = theirs;
                return true;
            }
        }
    }

    let current = assignments[index].room.capacity;
    if current < need.students {
        let larger = free
            .iter()
            .filter(|room| room.capacity > current)
            .min_by_key(|room| room.capacity);
        let fallback = || {
            free.iter()
                .filter(|room| room.capacity < need.students)
                .max_by_key(|room| room.capacity)
        };
        if let Some(room) = larger.or_else(fallback) {
            let room = Arc::clone(room);
            return reroom(assignments, index, room);
        }
    }

    false
}

/// Rooms other than its own that are free at the slot of
/// `assignments[index]`.
fn free_rooms(catalog: &Catalog, assignments: &[Assignment], index: usize) -> Vec<Arc<Room>> {
    let target = &assignments[index];
    catalog
        .rooms()
        .iter()
        .filter(|room| **room != target.room)
        .filter(|room| room_free(assignments, room, &target.time_slot, index))
        .cloned()
        .collect()
}

/// Moves `assignments[index]` with its room to a slot where teacher,
/// students and room are all free.
fn relocate(catalog: &Catalog, assignments: &mut [Assignment], index: usize) -> bool {
    let day = assignments[index].time_slot.day();
    let room = Arc::clone(&assignments[index].room);
    let view: &[Assignment] = assignments;
    let accept = |slot: &TimeSlot| room_free(view, &room, slot, index);
    match find_free_slot(catalog, view, index, Some(day), accept) {
        Some(slot) => {
            trace!(
                "rooms: {} moved from {} to {} in {}",
                assignments[index].class().name,
                assignments[index].time_slot,
                slot,
                room.name
            );
            assignments[index].time_slot = slot;
            true
        }
        None => false,
    }
}

/// Takes the largest free room at the current slot, whatever its fit.
fn force(catalog: &Catalog, assignments: &mut [Assignment], index: usize) {
    let largest = free_rooms(catalog, assignments, index)
        .into_iter()
        .max_by_key(|room| room.capacity);
    if let Some(room) = largest {
        reroom(assignments, index, room);
    }
}

/// A same-time assignment whose room fits `assignments[index]` under `fit`
/// and that can itself live in the room given up in exchange.
fn swap_partner(assignments: &[Assignment], index: usize, fit: Fit) -> Option<usize> {
    let target = &assignments[index];
    let need = Need::of(target);

    assignments
        .iter()
        .enumerate()
        .filter(|&(j, a)| {
            j != index
                && a.time_slot == target.time_slot
                && a.class().students <= target.room.capacity
                && (target.room.kinds.intersects(a.class_type().preferred_rooms)
                    || a.room.department != target.subject().department)
                && need.accepts(&a.room, fit)
        })
        .min_by_key(|(_, a)| a.room.capacity)
        .map(|(j, _)| j)
}

fn reroom(assignments: &mut [Assignment], index: usize, room: Arc<Room>) -> bool {
    trace!(
        "rooms: {} moves from {} to {}",
        assignments[index].class().name,
        assignments[index].room.name,
        room.name
    );
    assignments[index].room = room;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{hard, soft};
    use crate::fixtures::{self, AssignmentBuilder};
    use crate::models::Day;

    #[test]
    fn test_prefers_smallest_strict_fit() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        // lab group in the MATH regular room
        let mut list = vec![b.at(2, "T2", 2, Day::Monday, 8, 0, 60)];
        assert!(improve(&catalog, &mut list, 0, false));
        assert_eq!(list[0].room.name, "L1");
    }

    #[test]
    fn test_skips_rooms_in_use() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(4, "T3", 3, Day::Monday, 8, 0, 60),
            b.at(2, "T2", 2, Day::Monday, 8, 0, 60),
        ];
        assert!(improve(&catalog, &mut list, 1, false));
        assert_eq!(list[1].room.name, "L2");
    }

    #[test]
    fn test_capacity_fix_moves_lecture_to_auditorium() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(0, "T1", 3, Day::Tuesday, 10, 0, 60),
            b.at(2, "T2", 4, Day::Tuesday, 10, 0, 60),
        ];
        assert_eq!(hard::room_capacity_exceeded(&list), 1);
        fix_capacity(&catalog, &mut list);
        assert_eq!(hard::room_capacity_exceeded(&list), 0);
        assert_eq!(list[0].room.name, "A1");
    }

    #[test]
    fn test_swap_when_no_room_is_free() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        // every room busy; the lecture sits in a regular room, the seminar
        // in the auditorium
        let mut list = vec![
            b.at(0, "T1", 1, Day::Monday, 8, 0, 60),
            b.at(6, "T4", 0, Day::Monday, 8, 0, 60),
            b.at(2, "T2", 3, Day::Monday, 8, 0, 60),
            b.at(4, "T3", 4, Day::Monday, 8, 0, 60),
            b.at(1, "T2", 2, Day::Monday, 8, 0, 60),
        ];
        assert!(improve(&catalog, &mut list, 0, false));
        assert_eq!(list[0].room.name, "A1");
        assert_eq!(list[1].room.name, "R1");
    }

    #[test]
    fn test_conflict_fix_frees_room() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(2, "T2", 3, Day::Friday, 9, 0, 60),
            b.at(4, "T3", 3, Day::Friday, 9, 0, 60),
        ];
        assert_eq!(hard::room_conflict(&list), 1);
        fix_conflicts(&catalog, &mut list);
        assert_eq!(hard::room_conflict(&list), 0);
        assert_eq!(list[0].room.name, "L1");
        assert_eq!(list[1].room.name, "L2");
    }

    #[test]
    fn test_conflict_fix_moves_slot_when_every_room_is_busy() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(0, "T1", 0, Day::Monday, 8, 0, 60),
            b.at(2, "T2", 3, Day::Monday, 8, 0, 60),
            b.at(4, "T3", 4, Day::Monday, 8, 0, 60),
            b.at(1, "T2", 1, Day::Monday, 8, 0, 60),
            b.at(3, "T3", 2, Day::Monday, 8, 0, 60),
            b.at(6, "T4", 0, Day::Monday, 8, 0, 60),
        ];
        assert_eq!(hard::room_conflict(&list), 1);

        fix_conflicts(&catalog, &mut list);

        assert_eq!(hard::room_conflict(&list), 0);
        assert_eq!(list[5].room.name, "A1");
        assert_eq!(list[5].time_slot, fixtures::slot(Day::Monday, 9, 0, 60));
    }

    #[test]
    fn test_conflict_fix_does_not_swap_the_clash_away() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(0, "T1", 0, Day::Monday, 8, 0, 60),
            b.at(1, "T2", 1, Day::Monday, 8, 0, 60),
            b.at(2, "T2", 3, Day::Monday, 8, 0, 60),
            b.at(4, "T3", 4, Day::Monday, 8, 0, 60),
            b.at(3, "T3", 2, Day::Monday, 8, 0, 60),
            b.at(6, "T4", 0, Day::Monday, 8, 0, 60),
        ];
        let seated: Vec<_> = list[..5].iter().map(|a| a.room.name.clone()).collect();

        fix_conflicts(&catalog, &mut list);

        let after: Vec<_> = list[..5].iter().map(|a| a.room.name.clone()).collect();
        assert_eq!(seated, after);
        assert_eq!(hard::room_conflict(&list), 0);
    }

    #[test]
    fn test_placement_fix_clears_soft_room_violations() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(6, "T4", 2, Day::Thursday, 8, 0, 60),
            b.at(2, "T2", 1, Day::Thursday, 9, 0, 60),
        ];
        improve_placement(&catalog, &mut list);
        assert_eq!(soft::out_of_department_room(&list), 0);
        assert_eq!(soft::preferred_room_type(&list), 0);
        assert_eq!(list[0].room.name, "R1");
        assert_eq!(list[1].room.name, "L1");
    }
}
