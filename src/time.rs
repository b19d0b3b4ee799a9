//! Wall-clock time handling.
//!
//! Times are compared only against other times of the same day, so they are
//! kept as minute-of-day integers rather than full date-time values.
use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::SchedulerError;

/// A time of day with minute granularity, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Builds a time from hour and minute, `None` when out of range.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay(hour * 60 + minute))
        } else {
            None
        }
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SchedulerError;

    /// Accepts `HH:MM`, plus the `HH:MM:SS` form some time pickers emit.
    /// Seconds are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let parsed = NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
            .map_err(|_| SchedulerError::InvalidTime {
                value: s.to_string(),
            })?;

        let minutes = (parsed.hour() * 60 + parsed.minute()) as u16;
        Ok(TimeOfDay(minutes))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Half-open interval `[start, end)` within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeSlot {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Zero and negative durations are not valid slots.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Adjacent slots (one ends when the other starts) do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }
}
