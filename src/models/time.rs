//! Timezone-aware timestamp handling.
//!
//! All timestamps crossing a string boundary (seed CSVs, the string
//! conversion API) use one fixed wall-clock format,
//! `YYYY-MM-DD HH:MM:SS.ffffff`. Business-hour bounds are time-of-day
//! strings in `HH:MM:SS`. Weekdays are indexed Monday = 0.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Wall-clock format used when emitting timestamps.
/// Always prints six fractional digits.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Wall-clock format used when parsing timestamps.
/// The fractional part is optional.
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Time-of-day format for business-hour bounds.
const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

/// Fallback zone for stores with no timezone assignment.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Chicago;

/// Errors from timestamp and timezone handling.
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    /// The zone name is not in the IANA database.
    #[error("unrecognized timezone '{0}'")]
    InvalidTimezone(String),

    /// The timestamp does not match the fixed wall-clock format.
    #[error("malformed timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },

    /// The time-of-day does not match `HH:MM:SS`.
    #[error("malformed time of day '{value}': {source}")]
    InvalidTimeOfDay {
        value: String,
        source: chrono::ParseError,
    },
}

/// Parse a wall-clock timestamp in the fixed format.
///
/// Tolerates a trailing ` UTC` marker (the seed data carries one) and a
/// missing fractional part.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimeError> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix(" UTC").unwrap_or(trimmed);
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_PARSE_FORMAT).map_err(|source| {
        TimeError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}

/// Format a wall-clock timestamp in the fixed format.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Resolve an IANA zone name.
pub fn parse_timezone(name: &str) -> Result<Tz, TimeError> {
    name.parse::<Tz>()
        .map_err(|_| TimeError::InvalidTimezone(name.to_string()))
}

/// Reinterpret a UTC wall-clock instant as local wall-clock in `tz`.
pub fn localize_datetime(ts: NaiveDateTime, tz: Tz) -> NaiveDateTime {
    ts.and_utc().with_timezone(&tz).naive_local()
}

/// Convert a UTC wall-clock timestamp string to the named zone's local
/// wall-clock, in the same fixed format.
pub fn localize(timestamp_utc: &str, timezone_name: &str) -> Result<String, TimeError> {
    let ts = parse_timestamp(timestamp_utc)?;
    let tz = parse_timezone(timezone_name)?;
    Ok(format_timestamp(localize_datetime(ts, tz)))
}

/// Weekday of a timestamp string, Monday = 0 through Sunday = 6.
pub fn weekday_of(timestamp: &str) -> Result<u8, TimeError> {
    let ts = parse_timestamp(timestamp)?;
    Ok(ts.weekday().num_days_from_monday() as u8)
}

/// Parse a `HH:MM:SS` time-of-day bound.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, TimeError> {
    NaiveTime::parse_from_str(value.trim(), TIME_OF_DAY_FORMAT).map_err(|source| {
        TimeError::InvalidTimeOfDay {
            value: value.to_string(),
            source,
        }
    })
}

/// Test whether the time-of-day component of `timestamp` lies in the
/// inclusive range `[start, end]`. Bounds are `HH:MM:SS` strings.
pub fn is_within_local_range(start: &str, end: &str, timestamp: &str) -> Result<bool, TimeError> {
    let start = parse_time_of_day(start)?;
    let end = parse_time_of_day(end)?;
    let tod = parse_timestamp(timestamp)?.time();
    Ok(start <= tod && tod <= end)
}

/// Reference "now" for report windows.
///
/// Report windows trail a reference instant. `Wall` tracks the real
/// clock; `Fixed` pins the reference so runs are reproducible against a
/// static observation set (and so tests are deterministic).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReportClock {
    /// Pinned UTC wall-clock reference.
    Fixed(NaiveDateTime),
    /// Live UTC wall-clock.
    Wall,
}

impl ReportClock {
    /// Current reference instant as UTC wall-clock.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Self::Fixed(ts) => *ts,
            Self::Wall => Utc::now().naive_utc(),
        }
    }
}

impl Default for ReportClock {
    fn default() -> Self {
        Self::Wall
    }
}

/// End of the synthetic all-day window used for stores with no
/// configured hours.
pub fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid time")
}

/// Start of day, midnight.
pub fn start_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).expect("00:00:00 is a valid time")
}
