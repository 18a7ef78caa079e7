//! Weekly load repair: drop surplus sessions and add missing ones.

use std::collections::HashMap;
use std::sync::Arc;

use log::trace;
use rand::Rng;

use crate::models::{Assignment, Catalog, Room, Session, TimeSlot};

/// Resources freed by a removed surplus session.
struct Donor {
    subject: String,
    letters: Vec<char>,
    teacher: Arc<str>,
    room: Arc<Room>,
    time_slot: TimeSlot,
}

/// Brings every (subject, class type, class) to its weekly session count.
///
/// Surplus sessions are removed and their teacher, room and slot kept as
/// donors. Missing sessions take a donor for the same subject and group
/// letters (preferring one whose teacher is eligible), else any donor,
/// else random eligible resources. Each donor is used at most once.
///
/// The result follows the catalog's session order, so position `i` of every
/// repaired timetable holds the same session.
pub(crate) fn fix<R: Rng>(catalog: &Catalog, assignments: &mut Vec<Assignment>, rng: &mut R) {
    let mut existing: HashMap<Session, Vec<usize>> = HashMap::new();
    for (i, a) in assignments.iter().enumerate() {
        existing.entry(a.session.clone()).or_default().push(i);
    }

    let mut remove = vec![false; assignments.len()];
    let mut donors = Vec::new();
    let mut missing: Vec<Session> = Vec::new();

    for subject in catalog.subjects() {
        for (ct_index, ct) in subject.class_types.iter().enumerate() {
            for class_index in 0..ct.classes.len() {
                let Some(session) = Session::new(Arc::clone(subject), ct_index, class_index) else {
                    continue;
                };
                let expected = ct.sessions_per_week as usize;
                let present = existing.get(&session).map_or(&[][..], Vec::as_slice);

                for &i in present.iter().skip(expected) {
                    let a = &assignments[i];
                    donors.push(Donor {
                        subject: a.subject().name.clone(),
                        letters: a.class().letters.clone(),
                        teacher: a.teacher.clone(),
                        room: a.room.clone(),
                        time_slot: a.time_slot,
                    });
                    remove[i] = true;
                }
                for _ in present.len()..expected {
                    missing.push(session.clone());
                }
            }
        }
    }

    let mut flags = remove.into_iter();
    assignments.retain(|_| !flags.next().unwrap_or(false));

    for session in missing {
        let pick = donor_for(&session, &donors).or(if donors.is_empty() { None } else { Some(0) });
        let assignment = match pick {
            Some(d) => {
                let donor = donors.remove(d);
                trace!(
                    "load: {} reuses {} / {} / {}",
                    session.class().name,
                    donor.teacher,
                    donor.room.name,
                    donor.time_slot
                );
                Assignment::new(session, donor.teacher, donor.room, donor.time_slot)
            }
            None => catalog.random_assignment(session, rng),
        };
        assignments.push(assignment);
    }

    let mut order: HashMap<&Session, usize> = HashMap::new();
    for (i, session) in catalog.sessions().iter().enumerate() {
        order.entry(session).or_insert(i);
    }
    assignments.sort_by_key(|a| order.get(&a.session).copied().unwrap_or(usize::MAX));
}

fn donor_for(session: &Session, donors: &[Donor]) -> Option<usize> {
    let matching: Vec<usize> = donors
        .iter()
        .enumerate()
        .filter(|(_, d)| {
            d.subject == session.subject().name && d.letters == session.class().letters
        })
        .map(|(i, _)| i)
        .collect();

    matching
        .iter()
        .copied()
        .find(|&i| session.class_type().is_eligible(&donors[i].teacher))
        .or_else(|| matching.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::hard;
    use crate::fixtures::{self, AssignmentBuilder};
    use crate::models::Day;
    use crate::random::create_rng;

    #[test]
    fn test_surplus_moves_to_missing() {
        let catalog = fixtures::load_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = Vec::new();
        for h in 0..4 {
            list.push(b.at(0, "T1", 3, Day::Monday, 8 + h, 0, 60));
        }
        for h in 0..5 {
            list.push(b.at(6, "T2", 4, Day::Tuesday, 8 + h, 0, 60));
        }
        assert_eq!(hard::assignment_load(catalog.subjects(), &list), 3);

        let mut rng = create_rng(1);
        fix(&catalog, &mut list, &mut rng);

        assert_eq!(hard::assignment_load(catalog.subjects(), &list), 0);
        assert_eq!(list.len(), 8);
        // the two new X sessions reuse slots freed by Y
        let reused = list
            .iter()
            .filter(|a| a.subject().name == "X" && a.time_slot.day() == Day::Tuesday)
            .count();
        assert_eq!(reused, 2);
    }

    #[test]
    fn test_refills_keep_catalog_session_order() {
        let catalog = fixtures::load_catalog();
        let b = AssignmentBuilder::new(&catalog);
        // Y first, X short by two
        let mut list = Vec::new();
        for h in 0..2 {
            list.push(b.at(6, "T2", 4, Day::Tuesday, 8 + h, 0, 60));
        }
        for h in 0..4 {
            list.push(b.at(0, "T1", 3, Day::Monday, 8 + h, 0, 60));
        }

        let mut rng = create_rng(3);
        fix(&catalog, &mut list, &mut rng);

        let sessions: Vec<&Session> = list.iter().map(|a| &a.session).collect();
        let expected: Vec<&Session> = catalog.sessions().iter().collect();
        assert_eq!(sessions, expected);
    }

    #[test]
    fn test_fills_from_catalog_without_donors() {
        let catalog = fixtures::small_catalog();
        let mut list = Vec::new();
        let mut rng = create_rng(2);
        fix(&catalog, &mut list, &mut rng);

        assert_eq!(list.len(), catalog.sessions().len());
        assert_eq!(hard::assignment_load(catalog.subjects(), &list), 0);
        assert!(list.iter().all(|a| a.has_eligible_teacher()));
    }
}
