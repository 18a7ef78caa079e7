//! Meal-break repairs for students and teachers.

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use super::common::{find_free_slot, Audience};
use crate::constraints::hard::{misses_break, spans_window};
use crate::constraints::rules::MealWindow;
use crate::models::{Assignment, Catalog};

/// Opens a meal break for every (audience, day) group that needs one.
///
/// Sessions overlapping the window are tried in random order; the first one
/// whose removal leaves a long enough break is moved to a slot where its
/// teacher and students are free and that keeps it out of the window on its
/// current day. Groups where no single move helps are left as they are.
pub(crate) fn fix<R: Rng>(
    catalog: &Catalog,
    assignments: &mut [Assignment],
    rng: &mut R,
    audience: Audience,
    window: MealWindow,
) {
    for group in audience.groups(assignments) {
        if !spans_window(assignments, &group, window) || !misses_break(assignments, &group, window)
        {
            continue;
        }

        let mut candidates: Vec<usize> = group
            .iter()
            .copied()
            .filter(|&i| assignments[i].time_slot.intersects(window.start, window.end))
            .collect();
        candidates.shuffle(rng);

        for candidate in candidates {
            let rest: Vec<usize> = group.iter().copied().filter(|&i| i != candidate).collect();
            if misses_break(assignments, &rest, window) {
                continue;
            }

            let day = assignments[candidate].time_slot.day();
            let target = find_free_slot(catalog, assignments, candidate, Some(day), |slot| {
                slot.day() != day || !slot.intersects(window.start, window.end)
            });
            if let Some(slot) = target {
                trace!(
                    "breaks: {} moved from {} to {} ({:?})",
                    assignments[candidate].class().name,
                    assignments[candidate].time_slot,
                    slot,
                    audience
                );
                assignments[candidate].time_slot = slot;
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::hard;
    use crate::constraints::rules::LUNCH;
    use crate::fixtures::{self, AssignmentBuilder};
    use crate::models::Day;
    use crate::random::create_rng;

    #[test]
    fn test_students_lunch_moves_window_session() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(2, "T2", 3, Day::Monday, 10, 0, 120),
            b.at(3, "T2", 3, Day::Monday, 12, 15, 105),
        ];
        assert_eq!(hard::students_meal_break(&list, LUNCH), 1);

        let mut rng = create_rng(7);
        fix(&catalog, &mut list, &mut rng, Audience::Students, LUNCH);

        assert_eq!(hard::students_meal_break(&list, LUNCH), 0);
        assert_eq!(list[0].time_slot, fixtures::slot(Day::Monday, 10, 0, 120));
        assert_eq!(list[1].time_slot, fixtures::slot(Day::Monday, 8, 0, 60));
    }

    #[test]
    fn test_teachers_lunch_respects_other_classes() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(0, "T1", 0, Day::Monday, 10, 0, 120),
            b.at(6, "T1", 1, Day::Monday, 12, 15, 105),
            b.at(2, "T3", 3, Day::Monday, 8, 0, 60),
        ];
        assert_eq!(hard::teachers_meal_break(&list, LUNCH), 1);

        let mut rng = create_rng(7);
        fix(&catalog, &mut list, &mut rng, Audience::Teachers, LUNCH);

        assert_eq!(hard::teachers_meal_break(&list, LUNCH), 0);
        // the seminar shares group A with the lab at 08:00
        assert_eq!(list[1].time_slot, fixtures::slot(Day::Monday, 9, 0, 60));
    }

    #[test]
    fn test_unresolvable_group_is_left_alone() {
        let catalog = fixtures::small_catalog();
        let b = AssignmentBuilder::new(&catalog);
        let mut list = vec![
            b.at(2, "T2", 3, Day::Monday, 10, 0, 230),
            b.at(3, "T2", 3, Day::Monday, 12, 0, 120),
        ];
        let before = list.clone();

        let mut rng = create_rng(3);
        fix(&catalog, &mut list, &mut rng, Audience::Students, LUNCH);

        assert_eq!(list[0].time_slot, before[0].time_slot);
        assert_eq!(list[1].time_slot, before[1].time_slot);
    }
}
