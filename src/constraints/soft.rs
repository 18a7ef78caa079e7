//! Quality constraints.

use super::grouping::{self, intervals, sort_by_slot, total_minutes};
use super::intervals::gap_intervals;
use super::rules::{
    CONTINUITY_THRESHOLD_MINUTES, DINNER, GAP_UNIT_MINUTES, LUNCH, MIN_DAILY_MINUTES,
    MIN_MEAL_BREAK_MINUTES,
};
use crate::models::Assignment;

/// Idle half-hours in student days, not counting a proper meal break.
///
/// For each meal window, the gap with the longest stretch inside the window
/// is excused when that stretch is long enough to be the meal break.
pub fn student_gaps(assignments: &[Assignment]) -> u32 {
    grouping::students_by_day(assignments)
        .iter()
        .map(|group| {
            let mut gaps = gap_intervals(intervals(assignments, group), None);
            for window in [LUNCH, DINNER] {
                let inside = |&(s, e): &(u16, u16)| {
                    e.min(window.end).saturating_sub(s.max(window.start))
                };
                let meal = gaps
                    .iter()
                    .enumerate()
                    .max_by_key(|(_, gap)| inside(*gap))
                    .filter(|(_, gap)| inside(*gap) >= MIN_MEAL_BREAK_MINUTES)
                    .map(|(pos, _)| pos);
                if let Some(pos) = meal {
                    gaps.remove(pos);
                }
            }
            gaps.iter().map(|&(s, e)| gap_units(e - s)).sum::<u32>()
        })
        .sum()
}

/// Penalises sessions of a subject taught out of the lecture, seminar, lab
/// order for a student group.
pub fn incorrect_order(assignments: &[Assignment]) -> u32 {
    let mut violations = 0;
    for mut group in grouping::by_subject_letter(assignments) {
        sort_by_slot(assignments, &mut group);
        for pair in group.windows(2) {
            let prev = assignments[pair[0]].class_type().format.ordinal();
            let next = assignments[pair[1]].class_type().format.ordinal();
            violations += prev.saturating_sub(next);
        }
    }
    violations
}

pub fn out_of_department_room(assignments: &[Assignment]) -> u32 {
    assignments
        .iter()
        .filter(|a| a.room.department != a.subject().department)
        .count() as u32
}

pub fn preferred_room_type(assignments: &[Assignment]) -> u32 {
    assignments
        .iter()
        .filter(|a| !a.room.kinds.intersects(a.class_type().preferred_rooms))
        .count() as u32
}

/// Student days with less than the minimum teaching time.
pub fn students_min_daily(assignments: &[Assignment]) -> u32 {
    grouping::students_by_day(assignments)
        .iter()
        .filter(|g| total_minutes(assignments, g) < MIN_DAILY_MINUTES)
        .count() as u32
}

/// Idle half-hours between sessions of the same class on a day.
pub fn continuous_class_gaps(assignments: &[Assignment]) -> u32 {
    continuous_blocks(assignments)
        .iter()
        .map(|group| {
            gap_intervals(intervals(assignments, group), None)
                .iter()
                .map(|&(s, e)| gap_units(e - s))
                .sum::<u32>()
        })
        .sum()
}

/// Adjacent sessions of a class taught by different teachers.
pub fn continuous_class_teachers(assignments: &[Assignment]) -> u32 {
    adjacent_changes(assignments, |a, b| a.teacher != b.teacher)
}

/// Adjacent sessions of a class held in different rooms.
pub fn continuous_class_rooms(assignments: &[Assignment]) -> u32 {
    adjacent_changes(assignments, |a, b| a.room != b.room)
}

/// Sessions of one subject booked in the same slot for a student group,
/// beyond the first.
pub fn multiple_assignments(assignments: &[Assignment]) -> u32 {
    grouping::by_subject_letter_slot(assignments)
        .iter()
        .map(|g| g.len().saturating_sub(1) as u32)
        .sum()
}

fn gap_units(minutes: u16) -> u32 {
    u32::from(minutes / GAP_UNIT_MINUTES)
}

/// Chronologically sorted class-day groups with at least two sessions.
fn continuous_blocks(assignments: &[Assignment]) -> Vec<Vec<usize>> {
    grouping::classes_by_day(assignments)
        .into_iter()
        .filter(|g| g.len() > 1)
        .map(|mut g| {
            sort_by_slot(assignments, &mut g);
            g
        })
        .collect()
}

fn adjacent_changes<F>(assignments: &[Assignment], changed: F) -> u32
where
    F: Fn(&Assignment, &Assignment) -> bool,
{
    let mut violations = 0;
    for group in continuous_blocks(assignments) {
        for pair in group.windows(2) {
            let (prev, next) = (&assignments[pair[0]], &assignments[pair[1]]);
            let gap = next.time_slot.start().saturating_sub(prev.time_slot.end());
            if gap < CONTINUITY_THRESHOLD_MINUTES && changed(prev, next) {
                violations += 1;
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, AssignmentBuilder};
    use crate::models::Day;

    #[test]
    fn test_student_gaps_counts_half_hours() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let list = vec![
            b.at(2, "T2", 3, Day::Monday, 8, 0, 60),
            b.at(3, "T2", 3, Day::Monday, 9, 30, 30),
            b.at(4, "T2", 4, Day::Monday, 8, 0, 60),
            b.at(5, "T2", 4, Day::Monday, 10, 15, 30),
        ];
        // group A: one 30 minute gap; group B: 75 minutes -> 2 units
        assert_eq!(student_gaps(&list), 3);
    }

    #[test]
    fn test_student_gaps_excuse_lunch() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let list = vec![
            b.at(2, "T2", 3, Day::Monday, 10, 0, 120),
            b.at(3, "T2", 3, Day::Monday, 14, 0, 120),
        ];
        assert_eq!(student_gaps(&list), 0);

        let list = vec![
            b.at(2, "T2", 3, Day::Monday, 10, 0, 120),
            b.at(3, "T2", 3, Day::Monday, 12, 15, 60),
        ];
        // the 15 minute gap is not a break and rounds down to zero units
        assert_eq!(student_gaps(&list), 0);
    }

    #[test]
    fn test_student_gaps_excuse_the_gap_holding_the_break() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        // free 11:00-12:20 and 13:00-14:30; only the second holds a
        // qualifying stretch of lunch, the first stays as 2 units
        let list = vec![
            b.at(2, "T2", 3, Day::Monday, 10, 0, 60),
            b.at(3, "T2", 3, Day::Monday, 12, 20, 40),
            b.at(2, "T2", 3, Day::Monday, 14, 30, 30),
        ];
        assert_eq!(student_gaps(&list), 2);
    }

    #[test]
    fn test_incorrect_order() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        // lab for group A on Monday, lecture for A and B on Tuesday
        let list = vec![
            b.at(2, "T2", 3, Day::Monday, 8, 0, 60),
            b.at(0, "T1", 0, Day::Tuesday, 8, 0, 60),
        ];
        assert_eq!(incorrect_order(&list), 3);

        let list = vec![
            b.at(0, "T1", 0, Day::Monday, 8, 0, 60),
            b.at(2, "T2", 3, Day::Tuesday, 8, 0, 60),
        ];
        assert_eq!(incorrect_order(&list), 0);
    }

    #[test]
    fn test_room_preferences() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        // room 0 auditorium INF, room 2 regular MATH
        let list = vec![
            b.at(0, "T1", 0, Day::Monday, 8, 0, 60),
            b.at(2, "T2", 2, Day::Monday, 8, 0, 60),
        ];
        assert_eq!(out_of_department_room(&list), 1);
        assert_eq!(preferred_room_type(&list), 1);
    }

    #[test]
    fn test_min_daily() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let list = vec![
            b.at(2, "T2", 3, Day::Monday, 8, 0, 120),
            b.at(3, "T2", 3, Day::Tuesday, 8, 0, 180),
        ];
        assert_eq!(students_min_daily(&list), 1);
    }

    #[test]
    fn test_continuous_class_changes() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let list = vec![
            b.at(2, "T2", 3, Day::Monday, 8, 0, 60),
            b.at(3, "T3", 4, Day::Monday, 9, 15, 60),
        ];
        assert_eq!(continuous_class_teachers(&list), 1);
        assert_eq!(continuous_class_rooms(&list), 1);
        assert_eq!(continuous_class_gaps(&list), 0);

        let list = vec![
            b.at(2, "T2", 3, Day::Monday, 8, 0, 60),
            b.at(3, "T3", 4, Day::Monday, 10, 0, 60),
        ];
        assert_eq!(continuous_class_teachers(&list), 0);
        assert_eq!(continuous_class_rooms(&list), 0);
        assert_eq!(continuous_class_gaps(&list), 2);
    }

    #[test]
    fn test_multiple_assignments() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        // lecture covers A and B, lab covers A: A is double booked
        let list = vec![
            b.at(0, "T1", 0, Day::Monday, 8, 0, 60),
            b.at(2, "T2", 3, Day::Monday, 8, 0, 60),
        ];
        assert_eq!(multiple_assignments(&list), 1);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(student_gaps(&[]), 0);
        assert_eq!(incorrect_order(&[]), 0);
        assert_eq!(out_of_department_room(&[]), 0);
        assert_eq!(preferred_room_type(&[]), 0);
        assert_eq!(students_min_daily(&[]), 0);
        assert_eq!(continuous_class_gaps(&[]), 0);
        assert_eq!(continuous_class_teachers(&[]), 0);
        assert_eq!(continuous_class_rooms(&[]), 0);
        assert_eq!(multiple_assignments(&[]), 0);
    }
}
