//! Daily-hours repair for students and teachers.

use log::trace;

use super::common::{find_free_slot, find_free_teacher, Audience};
use crate::constraints::grouping::{sort_by_slot, total_minutes};
use crate::constraints::rules::MAX_DAILY_MINUTES;
use crate::models::{Assignment, Catalog};

/// Trims overloaded days from both ends.
///
/// The earliest and latest sessions of an overloaded (audience, day) group
/// are handled first, then the next pair inward, until the day fits the cap
/// or every session has been tried. Teachers hand a session to another
/// eligible teacher free at that slot when they can; otherwise the session
/// moves to a free slot on another day.
pub(crate) fn fix(catalog: &Catalog, assignments: &mut [Assignment], audience: Audience) {
    for mut group in audience.groups(assignments) {
        let mut remaining = total_minutes(assignments, &group);
        if remaining <= MAX_DAILY_MINUTES {
            continue;
        }
        sort_by_slot(assignments, &mut group);

        let (mut left, mut right) = (0, group.len() - 1);
        while remaining > MAX_DAILY_MINUTES && left <= right {
            let pair = if left == right { vec![left] } else { vec![left, right] };
            for position in pair {
                if remaining <= MAX_DAILY_MINUTES {
                    break;
                }
                let index = group[position];
                let minutes = u32::from(assignments[index].time_slot.duration());
                if unload(catalog, assignments, index, audience) {
                    remaining -= minutes;
                }
            }

            left += 1;
            if right == 0 {
                break;
            }
            right -= 1;
        }
    }
}

/// Takes one session off its group's day. Returns whether it left.
fn unload(
    catalog: &Catalog,
    assignments: &mut [Assignment],
    index: usize,
    audience: Audience,
) -> bool {
    if audience == Audience::Teachers {
        if let Some(teacher) = find_free_teacher(assignments, index) {
            trace!(
                "hours: {} handed from {} to {}",
                assignments[index].class().name,
                assignments[index].teacher,
                teacher
            );
            assignments[index].teacher = teacher;
            return true;
        }
    }

    let day = assignments[index].time_slot.day();
    match find_free_slot(catalog, assignments, index, None, |slot| slot.day() != day) {
        Some(slot) => {
            trace!(
                "hours: {} moved from {} to {}",
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
