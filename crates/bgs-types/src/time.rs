//! Relative-time phrases for report fields.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Human phrase for how long ago `then` was, relative to the wall clock.
pub fn relative_from_now(then: DateTime<Utc>) -> String {
    relative_between(then, Utc::now())
}

/// Human phrase for the span between `then` and `now`, e.g.
/// "5 minutes ago" or "in 2 hours".
pub fn relative_between(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 0 {
        format!("in {}", span_phrase(-seconds))
    } else {
        format!("{} ago", span_phrase(seconds))
    }
}

// Thresholds and rounding follow the usual humanised-duration breakpoints:
// a unit reads as singular up to roughly 1.5x its length, then counts.
fn span_phrase(seconds: i64) -> String {
    match seconds {
        s if s < 45 => "a few seconds".to_string(),
        s if s < 90 => "a minute".to_string(),
        s if s < 45 * MINUTE => format!("{} minutes", round_div(s, MINUTE)),
        s if s < 90 * MINUTE => "an hour".to_string(),
        s if s < 22 * HOUR => format!("{} hours", round_div(s, HOUR)),
        s if s < 36 * HOUR => "a day".to_string(),
        s if s < 26 * DAY => format!("{} days", round_div(s, DAY)),
        s if s < 46 * DAY => "a month".to_string(),
        s if s < 320 * DAY => format!("{} months", round_div(s, MONTH)),
        s if s < 548 * DAY => "a year".to_string(),
        s => format!("{} years", round_div(s, YEAR)),
    }
}

fn round_div(value: i64, unit: i64) -> i64 {
    (value + unit / 2) / unit
}
