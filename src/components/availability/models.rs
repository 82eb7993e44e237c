use super::weekday::DayOfWeek;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// A named sub-window of a day, e.g. "Morning (9am-12pm)"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTimeBlock")]
pub struct TimeBlock {
    pub name: String,
    /// Free-text override such as "9:00 AM - 12:00 PM"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_range: Option<String>,
}

impl TimeBlock {
    /// Create a block without an override
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            custom_range: None,
        }
    }

    /// Create a block with an override range
    pub fn with_range(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            custom_range: Some(range.into()),
        }
    }
}

/// Stored blocks come in a few shapes: bare strings from older records, and
/// objects that carry the override either as `custom_range` or as `range`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimeBlock {
    Name(String),
    Block {
        name: String,
        #[serde(default, alias = "range")]
        custom_range: Option<String>,
    },
}

impl From<RawTimeBlock> for TimeBlock {
    fn from(raw: RawTimeBlock) -> Self {
        match raw {
            RawTimeBlock::Name(name) => TimeBlock::new(name),
            RawTimeBlock::Block { name, custom_range } => TimeBlock { name, custom_range },
        }
    }
}

/// A coach's availability for one weekday
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub time_blocks: Vec<TimeBlock>,
}

impl DayAvailability {
    /// An available day with the given blocks
    pub fn open(time_blocks: Vec<TimeBlock>) -> Self {
        Self {
            available: true,
            time_blocks,
        }
    }

    /// A day that takes no bookings
    pub fn closed() -> Self {
        Self::default()
    }
}

/// Recurring weekly schedule keyed by weekday
///
/// Keys that name no weekday are skipped when reading, along with their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeeklyAvailability(BTreeMap<DayOfWeek, DayAvailability>);

impl WeeklyAvailability {
    /// Availability for a weekday, if the schedule mentions it
    pub fn day(&self, day: DayOfWeek) -> Option<&DayAvailability> {
        self.0.get(&day)
    }

    /// Mutable availability for a weekday, inserting a closed day if missing
    pub fn day_mut(&mut self, day: DayOfWeek) -> &mut DayAvailability {
        self.0.entry(day).or_default()
    }

    /// Mutable availability for a weekday the schedule already mentions
    pub fn get_day_mut(&mut self, day: DayOfWeek) -> Option<&mut DayAvailability> {
        self.0.get_mut(&day)
    }

    /// Replace a weekday's availability
    pub fn set_day(&mut self, day: DayOfWeek, availability: DayAvailability) {
        self.0.insert(day, availability);
    }

    /// Builder-style variant of `set_day`
    pub fn with_day(mut self, day: DayOfWeek, availability: DayAvailability) -> Self {
        self.set_day(day, availability);
        self
    }

    /// Whether bookings are accepted on the weekday at all
    pub fn is_available(&self, day: DayOfWeek) -> bool {
        self.day(day).map(|d| d.available).unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Days in Sunday-first order
    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &DayAvailability)> {
        self.0.iter().map(|(day, availability)| (*day, availability))
    }
}

impl<'de> Deserialize<'de> for WeeklyAvailability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WeeklyVisitor)
    }
}

struct WeeklyVisitor;

impl<'de> Visitor<'de> for WeeklyVisitor {
    type Value = WeeklyAvailability;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from weekday to availability")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut days = BTreeMap::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.parse::<DayOfWeek>() {
                Ok(day) => {
                    days.insert(day, map.next_value::<DayAvailability>()?);
                }
                Err(_) => {
                    debug!("Skipping schedule entry '{}'", key);
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(WeeklyAvailability(days))
    }
}
