//! Julian-date and ISO-8601 conversion helpers built on chrono.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use crate::constants::{SECONDS_PER_DAY, UNIX_EPOCH_JD};

/// Errors surfaced while converting between epochs.
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("failed to parse `{input}` as an ISO-8601 timestamp: {source}")]
    Parse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("julian date {0} is outside the representable calendar range")]
    OutOfRange(f64),
}

/// Convert a Julian Date to a UTC timestamp.
///
/// Returns `None` for non-finite input or dates outside chrono's calendar
/// range (roughly +/- 260,000 years, far beyond the engine's bounds).
pub fn jd_to_datetime(jd: f64) -> Option<DateTime<Utc>> {
    if !jd.is_finite() {
        return None;
    }
    let millis = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1_000.0;
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
}

/// Convert a Julian Date to an ISO-8601 string with millisecond precision.
pub fn jd_to_iso(jd: f64) -> Option<String> {
    jd_to_datetime(jd).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parse an ISO-8601 / RFC 3339 timestamp into a Julian Date.
pub fn iso_to_jd(input: &str) -> Result<f64, TimeError> {
    let parsed = DateTime::parse_from_rfc3339(input).map_err(|source| TimeError::Parse {
        input: input.to_string(),
        source,
    })?;
    Ok(datetime_to_jd(&parsed.with_timezone(&Utc)))
}

/// Convert a UTC timestamp to a Julian Date.
pub fn datetime_to_jd(dt: &DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JD + dt.timestamp_millis() as f64 / (SECONDS_PER_DAY * 1_000.0)
}

/// Convert a cadence expressed in hours to fractional days.
#[inline]
pub fn hours_to_days(hours: f64) -> f64 {
    hours / 24.0
}
