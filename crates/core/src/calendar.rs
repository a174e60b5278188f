//! Date and time-of-day helpers shared by request validation and the lesson
//! query engine. Dates travel as `YYYY-MM-DD`, times as `HH:MM`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::errors::{CollegeError, CollegeResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a zero-padded `YYYY-MM-DD` string, returning `None` on any
/// mismatch. chrono alone would also take unpadded fields.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Like [`parse_date`] but reports a validation error naming the field.
pub fn require_date(field: &str, value: &str) -> CollegeResult<NaiveDate> {
    parse_date(value).ok_or_else(|| {
        CollegeError::Validation(format!("{field} must be a date in YYYY-MM-DD format"))
    })
}

/// Rejects anything that is not a valid `HH:MM` time of day.
pub fn require_time(field: &str, value: &str) -> CollegeResult<()> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map(|_| ())
        .map_err(|_| CollegeError::Validation(format!("{field} must be a time in HH:MM format")))
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Last whole second of the day, the inclusive upper bound of a date range.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::seconds(1)
}

/// Exclusive upper bound for a single-day window.
pub fn next_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
