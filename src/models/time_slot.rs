//! Weekly time slots.
//!
//! Times of day are minutes since midnight. A [`TimeSlot`] is an immutable
//! value; its duration and [`TimeOfDay`] bucket are derived from the start
//! and end times, never stored separately.

use std::fmt;

/// Minutes since midnight for `hour:minute`.
pub const fn clock(hour: u16, minute: u16) -> u16 {
    hour * 60 + minute
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All days, Sunday first.
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Three-letter abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Day::Sunday => "SUN",
            Day::Monday => "MON",
            Day::Tuesday => "TUE",
            Day::Wednesday => "WED",
            Day::Thursday => "THU",
            Day::Friday => "FRI",
            Day::Saturday => "SAT",
        }
    }
}

/// Coarse part of the day a slot starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeOfDay {
    /// Starts before 13:00.
    Morning,
    /// Starts from 13:00 to before 18:00.
    Afternoon,
    /// Starts from 18:00 to before 21:00.
    Evening,
    /// Starts at 21:00 or later.
    Night,
}

impl TimeOfDay {
    /// Bucket for a start time given in minutes since midnight.
    pub fn from_start(start: u16) -> Self {
        match start / 60 {
            0..=12 => TimeOfDay::Morning,
            13..=17 => TimeOfDay::Afternoon,
            18..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

/// One weekly time slot: a day plus a half-open `[start, end)` interval.
///
/// Ordering is by day, then start time (then end time, so that ordering
/// agrees with equality).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSlot {
    day: Day,
    start: u16,
    end: u16,
}

impl TimeSlot {
    /// Creates a slot from start and end minutes since midnight.
    ///
    /// Returns `None` if `end <= start` or `end` is past midnight.
    pub fn new(day: Day, start: u16, end: u16) -> Option<Self> {
        if end <= start || end > clock(24, 0) {
            return None;
        }
        Some(Self { day, start, end })
    }

    /// Creates a slot starting at `hour:minute` lasting `minutes`.
    pub fn starting_at(day: Day, hour: u16, minute: u16, minutes: u16) -> Option<Self> {
        let start = clock(hour, minute);
        Self::new(day, start, start.saturating_add(minutes))
    }

    pub fn day(&self) -> Day {
        self.day
    }

    /// Start, in minutes since midnight.
    pub fn start(&self) -> u16 {
        self.start
    }

    /// End, in minutes since midnight.
    pub fn end(&self) -> u16 {
        self.end
    }

    /// Duration in minutes.
    pub fn duration(&self) -> u16 {
        self.end - self.start
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_start(self.start)
    }

    /// Whether this slot shares any time with `[start, end)` on its day.
    pub fn intersects(&self, start: u16, end: u16) -> bool {
        self.start < end && start < self.end
    }

    /// Whether the two slots share any time on the same day.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day == other.day && self.intersects(other.start, other.end)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02} - {:02}:{:02}",
            self.day.abbreviation(),
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}
