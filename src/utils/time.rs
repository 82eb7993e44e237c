use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// The calendar date it currently is in `tz`
pub fn today_in(tz: Tz) -> NaiveDate {
    local_date(Utc::now(), tz)
}

/// The calendar date of an instant as seen in `tz`
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    tz.from_utc_datetime(&instant.naive_utc()).date_naive()
}

/// `days` consecutive dates starting at `from`
pub fn date_range(from: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days as i64)
        .filter_map(|offset| from.checked_add_signed(Duration::days(offset)))
        .collect()
}

/// Get date range for the Sunday-first week containing `date`
pub fn week_containing(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let sunday = date
        .checked_sub_signed(Duration::days(date.weekday().num_days_from_sunday() as i64))
        .unwrap_or(date);

    let saturday = sunday.checked_add_signed(Duration::days(6)).unwrap_or(sunday);

    (sunday, saturday)
}
