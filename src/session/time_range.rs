use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

/// Reference timezone for filter timestamps.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Kolkata;

/// Width of the default query window.
pub const DEFAULT_WINDOW_MINUTES: i64 = 60;

/// A `[start, end]` window as minute-precision civil timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

/// Compute the default last-hour window ending at `now`, expressed as
/// wall-clock time in `tz`.
///
/// The subtraction happens on the absolute instant and the timezone
/// projection afterwards, so the two endpoints are exactly sixty minutes
/// apart as instants regardless of the zone's offset.
pub fn default_window(now: DateTime<Utc>, tz: Tz) -> TimeWindow {
    let start = now - Duration::minutes(DEFAULT_WINDOW_MINUTES);
    TimeWindow { start: format_civil_minute(start, tz), end: format_civil_minute(now, tz) }
}

/// Project an instant into `tz` and format it `YYYY-MM-DDTHH:mm` (minute
/// granularity, seconds truncated).
pub fn format_civil_minute(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%Y-%m-%dT%H:%M").to_string()
}
