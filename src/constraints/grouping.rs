//! Index-based grouping of assignments.
//!
//! Groups hold indices into the assignment slice and come out in
//! first-seen order, so both the evaluators and the repairs that mutate
//! through these indices behave the same on every run.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::Assignment;

/// Groups assignment indices by one or more keys per assignment.
pub fn group_by<'a, K, I, F>(assignments: &'a [Assignment], keys: F) -> Vec<Vec<usize>>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
    F: Fn(&'a Assignment) -> I,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (index, assignment) in assignments.iter().enumerate() {
        for key in keys(assignment) {
            let slot = *slots.entry(key).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(index);
        }
    }
    groups
}

/// Student groups per day: one group per (course, group letter, day).
pub fn students_by_day(assignments: &[Assignment]) -> Vec<Vec<usize>> {
    group_by(assignments, |a| {
        let course = &a.subject().course;
        let day = a.time_slot.day();
        a.class().letters.iter().map(move |&l| (course, l, day))
    })
}

/// Teachers per day: one group per (teacher, day).
pub fn teachers_by_day(assignments: &[Assignment]) -> Vec<Vec<usize>> {
    group_by(assignments, |a| [(&*a.teacher, a.time_slot.day())])
}

pub fn by_slot_and_teacher(assignments: &[Assignment]) -> Vec<Vec<usize>> {
    group_by(assignments, |a| [(a.time_slot, &*a.teacher)])
}

pub fn by_slot_and_room(assignments: &[Assignment]) -> Vec<Vec<usize>> {
    group_by(assignments, |a| [(a.time_slot, a.room.name.as_str())])
}

/// Class groups per day, by class name.
pub fn classes_by_day(assignments: &[Assignment]) -> Vec<Vec<usize>> {
    group_by(assignments, |a| [(a.class().name.as_str(), a.time_slot.day())])
}

/// One group per (subject, group letter) across the week.
pub fn by_subject_letter(assignments: &[Assignment]) -> Vec<Vec<usize>> {
    group_by(assignments, |a| {
        let subject = a.subject();
        a.class().letters.iter().map(move |&l| (subject, l))
    })
}

/// One group per (subject, group letter, time slot).
pub fn by_subject_letter_slot(assignments: &[Assignment]) -> Vec<Vec<usize>> {
    group_by(assignments, |a| {
        let subject = a.subject();
        let slot = a.time_slot;
        a.class().letters.iter().map(move |&l| (subject, l, slot))
    })
}

/// Sorts group members chronologically.
pub fn sort_by_slot(assignments: &[Assignment], group: &mut [usize]) {
    group.sort_by_key(|&i| assignments[i].time_slot);
}

/// Sum of session minutes over a group.
pub fn total_minutes(assignments: &[Assignment], group: &[usize]) -> u32 {
    group
        .iter()
        .map(|&i| u32::from(assignments[i].time_slot.duration()))
        .sum()
}

/// The `[start, end)` intervals of a group.
pub fn intervals<'a>(
    assignments: &'a [Assignment],
    group: &'a [usize],
) -> impl Iterator<Item = (u16, u16)> + 'a {
    group.iter().map(move |&i| {
        let slot = assignments[i].time_slot;
        (slot.start(), slot.end())
    })
}
