//! Summary figures for a finished timetable.

use std::collections::HashSet;

use log::info;

use crate::constraints::grouping::{students_by_day, total_minutes};
use crate::constraints::rules::GAP_UNIT_MINUTES;
use crate::constraints::{soft, Evaluator, ViolationProfile};
use crate::models::{Assignment, Catalog};

/// How good a timetable is, beyond its score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleStatistics {
    /// Violation count per constraint.
    pub violations: ViolationProfile,
    /// Weighted score.
    pub score: u64,
    /// Share of (room, slot) pairs in use, from 0 to 1.
    pub room_utilisation: f64,
    /// Mean idle hours per student group day.
    pub mean_student_gap_hours: f64,
    /// Mean teaching hours per student group day.
    pub mean_daily_hours: f64,
}

impl ScheduleStatistics {
    pub fn compute(catalog: &Catalog, evaluator: &Evaluator, assignments: &[Assignment]) -> Self {
        let violations = evaluator.evaluate(assignments);
        let score = violations.score();

        let used: HashSet<_> = assignments
            .iter()
            .map(|a| (a.room.name.as_str(), a.room.department.as_str(), a.time_slot))
            .collect();
        let capacity = catalog.rooms().len() * catalog.time_slots().len();
        let room_utilisation = if capacity == 0 {
            0.0
        } else {
            used.len() as f64 / capacity as f64
        };

        let groups = students_by_day(assignments);
        let (mean_student_gap_hours, mean_daily_hours) = if groups.is_empty() {
            (0.0, 0.0)
        } else {
            let n = groups.len() as f64;
            let gap_hours =
                f64::from(soft::student_gaps(assignments)) * f64::from(GAP_UNIT_MINUTES) / 60.0;
            let minutes: u32 = groups.iter().map(|g| total_minutes(assignments, g)).sum();
            (gap_hours / n, f64::from(minutes) / 60.0 / n)
        };

        Self {
            violations,
            score,
            room_utilisation,
            mean_student_gap_hours,
            mean_daily_hours,
        }
    }

    /// Writes the summary to the `info` log.
    pub fn log_summary(&self) {
        info!("score: {}", self.score);
        info!("room use: {:.1}%", self.room_utilisation * 100.0);
        info!("average student gaps: {:.2} h", self.mean_student_gap_hours);
        info!("average hours per day: {:.2}", self.mean_daily_hours);
        if self.violations.total() == 0 {
            info!("no constraint violations");
            return;
        }
        info!("{} constraint violations:", self.violations.total());
        for (kind, count) in self.violations.violated() {
            info!("  {}: {}", kind.description(), count);
        }
    }

    /// Writes the summary next to an earlier one, with signed deltas.
    pub fn log_comparison(&self, before: &ScheduleStatistics) {
        info!("score: {} ({:+})", self.score, self.score as i64 - before.score as i64);
        info!(
            "room use: {:.1}% ({:+.1})",
            self.room_utilisation * 100.0,
            (self.room_utilisation - before.room_utilisation) * 100.0
        );
        info!(
            "average student gaps: {:.2} h ({:+.2})",
            self.mean_student_gap_hours,
            self.mean_student_gap_hours - before.mean_student_gap_hours
        );
        info!(
            "average hours per day: {:.2} ({:+.2})",
            self.mean_daily_hours,
            self.mean_daily_hours - before.mean_daily_hours
        );
        for (kind, count) in self.violations.iter() {
            let previous = before.violations.get(kind);
            if count != 0 || previous != 0 {
                info!(
                    "  {}: {} ({:+})",
                    kind.description(),
                    count,
                    i64::from(count) - i64::from(previous)
                );
            }
        }
    }
}
