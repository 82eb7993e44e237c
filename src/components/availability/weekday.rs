use crate::error::{validation_error, Error};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weekday symbol used as the key of a weekly schedule
///
/// Serialized as `Sun`..`Sat`; reading accepts any case of the short or full
/// name, so `Monday`, `monday` and `MON` all load as `Mon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayOfWeek {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

/// Indexed by chrono's `num_days_from_sunday` (0 = Sunday ... 6 = Saturday)
pub const SUNDAY_FIRST: [DayOfWeek; 7] = [
    DayOfWeek::Sun,
    DayOfWeek::Mon,
    DayOfWeek::Tue,
    DayOfWeek::Wed,
    DayOfWeek::Thu,
    DayOfWeek::Fri,
    DayOfWeek::Sat,
];

impl DayOfWeek {
    /// Look up a day by its Sunday-first index
    pub fn from_sunday_index(index: u32) -> Option<Self> {
        SUNDAY_FIRST.get(index as usize).copied()
    }

    /// The weekday a calendar date falls on
    pub fn from_date(date: NaiveDate) -> Self {
        // num_days_from_sunday is always in 0..7
        SUNDAY_FIRST[(date.weekday().num_days_from_sunday() % 7) as usize]
    }

    /// Short display name, also the serialized key
    pub fn short_name(&self) -> &'static str {
        match self {
            DayOfWeek::Sun => "Sun",
            DayOfWeek::Mon => "Mon",
            DayOfWeek::Tue => "Tue",
            DayOfWeek::Wed => "Wed",
            DayOfWeek::Thu => "Thu",
            DayOfWeek::Fri => "Fri",
            DayOfWeek::Sat => "Sat",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for DayOfWeek {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sun" | "sunday" => Ok(DayOfWeek::Sun),
            "mon" | "monday" => Ok(DayOfWeek::Mon),
            "tue" | "tuesday" => Ok(DayOfWeek::Tue),
            "wed" | "wednesday" => Ok(DayOfWeek::Wed),
            "thu" | "thursday" => Ok(DayOfWeek::Thu),
            "fri" | "friday" => Ok(DayOfWeek::Fri),
            "sat" | "saturday" => Ok(DayOfWeek::Sat),
            _ => Err(validation_error(&format!("Unknown weekday: {}", s))),
        }
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
