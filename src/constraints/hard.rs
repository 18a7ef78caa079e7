//! Feasibility constraints.

use std::collections::HashMap;
use std::sync::Arc;

use super::grouping::{self, intervals, total_minutes};
use super::intervals::max_gap;
use super::rules::{MealWindow, MAX_DAILY_MINUTES, MIN_MEAL_BREAK_MINUTES};
use crate::models::{Assignment, Session, Subject};

/// Sessions sharing a slot and a teacher, beyond the first.
pub fn teacher_conflict(assignments: &[Assignment]) -> u32 {
    excess(grouping::by_slot_and_teacher(assignments))
}

/// Sessions sharing a slot and a room, beyond the first.
pub fn room_conflict(assignments: &[Assignment]) -> u32 {
    excess(grouping::by_slot_and_room(assignments))
}

pub fn room_capacity_exceeded(assignments: &[Assignment]) -> u32 {
    assignments
        .iter()
        .filter(|a| a.class().students > a.room.capacity)
        .count() as u32
}

/// Sessions taught by someone outside the class type's eligible list.
pub fn unqualified_teacher(assignments: &[Assignment]) -> u32 {
    assignments
        .iter()
        .filter(|a| !a.has_eligible_teacher())
        .count() as u32
}

/// Distance of the timetable from the required weekly load.
///
/// Over- and under-assigned sessions are summed separately across every
/// (subject, class type, class) of the catalog; the larger total is the
/// violation count. An empty timetable has nothing to measure and counts 0.
pub fn assignment_load(subjects: &[Arc<Subject>], assignments: &[Assignment]) -> u32 {
    if assignments.is_empty() {
        return 0;
    }
    let mut actual: HashMap<&Session, u32> = HashMap::new();
    for a in assignments {
        *actual.entry(&a.session).or_insert(0) += 1;
    }

    let (mut over, mut under) = (0u32, 0u32);
    for subject in subjects {
        for (ct_index, ct) in subject.class_types.iter().enumerate() {
            for class_index in 0..ct.classes.len() {
                let Some(session) = Session::new(Arc::clone(subject), ct_index, class_index) else {
                    continue;
                };
                let count = actual.get(&session).copied().unwrap_or(0);
                let expected = ct.sessions_per_week;
                if count > expected {
                    over += count - expected;
                } else {
                    under += expected - count;
                }
            }
        }
    }
    over.max(under)
}

pub fn students_meal_break(assignments: &[Assignment], window: MealWindow) -> u32 {
    meal_breaks(assignments, grouping::students_by_day(assignments), window)
}

pub fn teachers_meal_break(assignments: &[Assignment], window: MealWindow) -> u32 {
    meal_breaks(assignments, grouping::teachers_by_day(assignments), window)
}

pub fn students_max_daily(assignments: &[Assignment]) -> u32 {
    over_daily_cap(assignments, grouping::students_by_day(assignments))
}

pub fn teachers_max_daily(assignments: &[Assignment]) -> u32 {
    over_daily_cap(assignments, grouping::teachers_by_day(assignments))
}

/// Whether a group has sessions on both sides of the window opening and
/// therefore needs a break inside it.
pub fn spans_window(assignments: &[Assignment], group: &[usize], window: MealWindow) -> bool {
    let before = group
        .iter()
        .any(|&i| assignments[i].time_slot.start() < window.start);
    let after = group
        .iter()
        .any(|&i| assignments[i].time_slot.start() >= window.start);
    before && after
}

/// Whether the group lacks a long enough break inside `window`.
pub fn misses_break(assignments: &[Assignment], group: &[usize], window: MealWindow) -> bool {
    max_gap(intervals(assignments, group), (window.start, window.end)) < MIN_MEAL_BREAK_MINUTES
}

fn meal_breaks(assignments: &[Assignment], groups: Vec<Vec<usize>>, window: MealWindow) -> u32 {
    groups
        .iter()
        .filter(|g| spans_window(assignments, g, window) && misses_break(assignments, g, window))
        .count() as u32
}

fn over_daily_cap(assignments: &[Assignment], groups: Vec<Vec<usize>>) -> u32 {
    groups
        .iter()
        .filter(|g| total_minutes(assignments, g) > MAX_DAILY_MINUTES)
        .count() as u32
}

fn excess(groups: Vec<Vec<usize>>) -> u32 {
    groups
        .iter()
        .map(|g| g.len().saturating_sub(1) as u32)
        .sum()
}
