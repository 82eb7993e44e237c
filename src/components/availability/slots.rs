use super::models::{TimeBlock, WeeklyAvailability};
use super::time::{format_slot, parse_time_token};
use super::weekday::DayOfWeek;
use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::HashSet;
use tracing::debug;

/// Length of a bookable session, in minutes
pub const SLOT_MINUTES: i64 = 60;

/// The range text a block describes, preferring its override
pub fn block_range(block: &TimeBlock) -> Option<&str> {
    if let Some(custom) = block.custom_range.as_deref() {
        let trimmed = custom.trim();
        if !trimmed.is_empty() && trimmed.contains('-') {
            return Some(custom);
        }
    }

    let range = parenthesized(&block.name)?;
    range.contains('-').then_some(range)
}

/// First non-empty "(...)" group in a label
fn parenthesized(label: &str) -> Option<&str> {
    let mut rest = label;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        let close = after.find(')')?;
        if close > 0 {
            return Some(&after[..close]);
        }
        rest = &after[close + 1..];
    }
    None
}

/// Start and end of a block, or `None` when either side cannot be read
pub fn block_bounds(block: &TimeBlock) -> Option<(NaiveTime, NaiveTime)> {
    let range = block_range(block)?;
    let mut parts = range.split('-');
    let start = parse_time_token(parts.next()?.trim())?;
    let end = parse_time_token(parts.next()?.trim())?;
    Some((start, end))
}

/// Hourly starts from `start` for sessions that end no later than `end`
pub fn hourly_starts(start: NaiveTime, end: NaiveTime) -> Vec<NaiveTime> {
    let step = Duration::minutes(SLOT_MINUTES);
    let mut starts = Vec::new();
    let mut current = start;

    loop {
        let (slot_end, wrapped) = current.overflowing_add_signed(step);
        // Slots never roll over into the next day
        if wrapped != 0 || slot_end > end {
            break;
        }
        starts.push(current);
        current = slot_end;
    }

    starts
}

/// Bookable one-hour start times for `date`, formatted like "9:00 AM".
///
/// A slot is offered only when the whole hour fits inside its block.
/// Days that are missing or switched off produce no slots, and blocks whose
/// range cannot be read are skipped so the remaining blocks still count.
/// Duplicates from overlapping blocks are dropped, keeping first-seen order.
pub fn derive_slots(weekly: Option<&WeeklyAvailability>, date: NaiveDate) -> Vec<String> {
    let weekday = DayOfWeek::from_date(date);

    let day = match weekly.and_then(|w| w.day(weekday)) {
        Some(day) if day.available => day,
        _ => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut slots = Vec::new();

    for block in &day.time_blocks {
        let Some((start, end)) = block_bounds(block) else {
            debug!("Skipping time block '{}' on {}: no readable range", block.name, weekday);
            continue;
        };

        for slot in hourly_starts(start, end).into_iter().map(format_slot) {
            if seen.insert(slot.clone()) {
                slots.push(slot);
            }
        }
    }

    slots
}

/// Whether a calendar should grey out `date` for this schedule
pub fn is_day_disabled(weekly: Option<&WeeklyAvailability>, date: NaiveDate) -> bool {
    let weekday = DayOfWeek::from_date(date);
    !weekly.map(|w| w.is_available(weekday)).unwrap_or(false)
}
