use chrono::NaiveTime;

/// A single way of reading a normalized time-of-day token
pub type ParseStrategy = fn(&str) -> Option<NaiveTime>;

/// Parse strategies in priority order. The first one that yields a time wins.
pub const PARSE_STRATEGIES: [(&str, ParseStrategy); 4] = [
    ("h:mm am", parse_meridiem_hour_minute),
    ("h am", parse_meridiem_hour),
    ("H:mm", parse_24h_hour_minute),
    ("H", parse_24h_hour),
];

/// Lowercase a token and put a space between a number and a trailing am/pm
pub fn normalize_time_token(token: &str) -> String {
    let lower = token.trim().to_lowercase();
    for suffix in ["am", "pm"] {
        if let Some(head) = lower.strip_suffix(suffix) {
            if head.ends_with(|c: char| c.is_ascii_digit()) {
                return format!("{} {}", head, suffix);
            }
        }
    }
    lower
}

/// Parse a time-of-day token such as "9am", "9:30 PM", "13:00" or "7"
pub fn parse_time_token(token: &str) -> Option<NaiveTime> {
    let normalized = normalize_time_token(token);
    PARSE_STRATEGIES
        .iter()
        .find_map(|(_, strategy)| strategy(&normalized))
}

/// Format a slot start the way it is shown to athletes, e.g. "1:00 PM"
pub fn format_slot(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// "9:30 am"
pub fn parse_meridiem_hour_minute(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%I:%M %p").ok()
}

/// "9 am"
pub fn parse_meridiem_hour(s: &str) -> Option<NaiveTime> {
    let (hour, suffix) = s.split_once(' ')?;
    if !is_hour_digits(hour) {
        return None;
    }
    NaiveTime::parse_from_str(&format!("{}:00 {}", hour, suffix.trim()), "%I:%M %p").ok()
}

/// "13:00"
pub fn parse_24h_hour_minute(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// "13"
pub fn parse_24h_hour(s: &str) -> Option<NaiveTime> {
    if !is_hour_digits(s) {
        return None;
    }
    let hour = s.parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hour, 0, 0)
}

fn is_hour_digits(s: &str) -> bool {
    (1..=2).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
}
