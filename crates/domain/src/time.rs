//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for submissions, reservations, status changes, etc.
pub type Timestamp = DateTime<Utc>;

/// Calendar date without a time zone (births, deaths, interments).
pub type Date = NaiveDate;

/// Return the current UTC time, truncated to microseconds.
///
/// Matches the precision timestamps are stored with.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Parse an RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimestamp`] when `value` is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(|_| ValidationError::InvalidTimestamp(value.to_owned()))
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] when `value` is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_owned()))
}
