//! Targeted repair heuristics.
//!
//! [`CorrectionModule`] evaluates a timetable, then runs the registered
//! repair for each violated constraint in evaluation order. Repairs are
//! best-effort local moves: a violation with no feasible alternative is
//! left in place, and no repair ever fails.
//!
//! | Constraint | Repair |
//! |------------|--------|
//! | weekly load | drop surplus sessions, refill missing ones from freed resources |
//! | teacher conflict | another free eligible teacher, else another free slot |
//! | room conflict | a free room at the same slot, else another free slot, else any free room |
//! | room capacity | tiered room search at the same slot |
//! | room department / kind | tiered room search at the same slot |
//! | unqualified teacher | a free eligible teacher |
//! | lunch / dinner breaks | move one session out of the meal window |
//! | daily hours cap | move sessions off the day from both ends inward |

mod breaks;
mod common;
mod hours;
mod load;
mod rooms;
mod teachers;

use log::debug;
use rand::Rng;

use crate::constraints::rules::{DINNER, LUNCH};
use crate::constraints::{ConstraintKind, Evaluator};
use crate::models::{Assignment, Catalog};
use crate::telemetry::Progress;
use common::Audience;

/// Applies repairs to timetables of one catalog.
///
/// # Examples
///
/// ```ignore
/// let evaluator = Evaluator::standard(&catalog);
/// let corrections = CorrectionModule::new(&catalog, &evaluator);
/// let repaired = corrections.apply(&mut schedule.assignments, &mut rng);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CorrectionModule<'a> {
    catalog: &'a Catalog,
    evaluator: &'a Evaluator,
}

impl<'a> CorrectionModule<'a> {
    pub fn new(catalog: &'a Catalog, evaluator: &'a Evaluator) -> Self {
        Self { catalog, evaluator }
    }

    /// Whether a repair is registered for `kind`.
    pub fn has_repair(kind: ConstraintKind) -> bool {
        use ConstraintKind::*;
        matches!(
            kind,
            AssignmentLoad
                | TeacherConflict
                | RoomConflict
                | RoomCapacityExceeded
                | UnqualifiedTeacher
                | StudentsLunchBreak
                | StudentsDinnerBreak
                | TeachersLunchBreak
                | TeachersDinnerBreak
                | TeachersMax8HoursDay
                | StudentsMax8HoursDay
                | OutOfDepartmentRoomUsage
                | PreferredRoomType
        )
    }

    /// Runs the repair registered for `kind`. Returns `false` when there is
    /// none.
    pub fn repair<R: Rng>(
        &self,
        kind: ConstraintKind,
        assignments: &mut Vec<Assignment>,
        rng: &mut R,
    ) -> bool {
        use ConstraintKind::*;
        let catalog = self.catalog;
        match kind {
            AssignmentLoad => load::fix(catalog, assignments, rng),
            TeacherConflict => teachers::fix_conflicts(catalog, assignments),
            RoomConflict => rooms::fix_conflicts(catalog, assignments),
            RoomCapacityExceeded => rooms::fix_capacity(catalog, assignments),
            UnqualifiedTeacher => teachers::requalify(assignments),
            StudentsLunchBreak => breaks::fix(catalog, assignments, rng, Audience::Students, LUNCH),
            StudentsDinnerBreak => {
                breaks::fix(catalog, assignments, rng, Audience::Students, DINNER)
            }
            TeachersLunchBreak => breaks::fix(catalog, assignments, rng, Audience::Teachers, LUNCH),
            TeachersDinnerBreak => {
                breaks::fix(catalog, assignments, rng, Audience::Teachers, DINNER)
            }
            TeachersMax8HoursDay => hours::fix(catalog, assignments, Audience::Teachers),
            StudentsMax8HoursDay => hours::fix(catalog, assignments, Audience::Students),
            OutOfDepartmentRoomUsage | PreferredRoomType => {
                rooms::improve_placement(catalog, assignments)
            }
            _ => return false,
        }
        true
    }

    /// Repairs every violated constraint that has a registered repair.
    ///
    /// Returns the constraints whose repair ran, in the order they ran.
    pub fn apply<R: Rng>(
        &self,
        assignments: &mut Vec<Assignment>,
        rng: &mut R,
    ) -> Vec<ConstraintKind> {
        self.apply_with_progress(assignments, rng, None)
    }

    /// Like [`apply`](Self::apply), reporting progress as the violation
    /// count handled so far out of the initial total.
    pub fn apply_with_progress<R: Rng>(
        &self,
        assignments: &mut Vec<Assignment>,
        rng: &mut R,
        progress: Option<Progress<'_>>,
    ) -> Vec<ConstraintKind> {
        let profile = self.evaluator.evaluate(assignments);
        let total = profile.total() as usize;
        let mut handled = 0usize;
        let mut repaired = Vec::new();

        for (kind, count) in profile.violated() {
            if self.repair(kind, assignments, rng) {
                debug!("correction: {} ({} violations)", kind, count);
                repaired.push(kind);
            }
            handled += count as usize;
            if let Some(report) = progress {
                report(
                    handled,
                    total,
                    &format!("Fixing constraint: {}", kind.description()),
                );
            }
        }
        repaired
    }
}
