//! Named constants of the constraint kernel.
//!
//! All times are minutes since midnight, all durations minutes.

use crate::models::clock;

/// A daily meal window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealWindow {
    pub start: u16,
    pub end: u16,
}

impl MealWindow {
    pub const fn length(self) -> u16 {
        self.end - self.start
    }
}

pub const LUNCH: MealWindow = MealWindow {
    start: clock(12, 0),
    end: clock(14, 0),
};

pub const DINNER: MealWindow = MealWindow {
    start: clock(20, 0),
    end: clock(22, 0),
};

/// Shortest free interval inside a meal window that counts as a break.
pub const MIN_MEAL_BREAK_MINUTES: u16 = 30;

/// Daily teaching time above which a teacher or student group is overloaded.
pub const MAX_DAILY_MINUTES: u32 = 8 * 60;

/// Daily teaching time below which a student day is too thin.
pub const MIN_DAILY_MINUTES: u32 = 3 * 60;

/// Largest gap between two sessions of a class that still makes them one
/// continuous block. Independent of [`MIN_MEAL_BREAK_MINUTES`].
pub const CONTINUITY_THRESHOLD_MINUTES: u16 = 30;

/// Gaps are penalised per whole unit of this many minutes.
pub const GAP_UNIT_MINUTES: u16 = 30;
