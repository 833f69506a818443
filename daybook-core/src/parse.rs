//! Parsing of user-supplied dates and date-times.
//!
//! Accepts the ISO-8601 shapes people actually type on a command line:
//! `2024-01-02`, `2024-01-02 09:00`, `2024-01-02T09:00`, with optional
//! seconds. Timezone offsets are rejected; every time is a floating local time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{DaybookError, DaybookResult};

/// Storage format for event times. Lexical order equals chronological order.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Storage format for task expiry dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date. A full date-time is accepted too and truncated to its date.
pub fn parse_date(input: &str) -> DaybookResult<NaiveDate> {
    let s = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(date);
    }

    parse_naive_datetime(s).map(|dt| dt.date()).ok_or_else(|| {
        DaybookError::InvalidInput(format!("Invalid date '{}'. Expected YYYY-MM-DD", input))
    })
}

/// Parse a date-time. A bare date means midnight of that day.
/// Sub-second precision is dropped.
pub fn parse_datetime(input: &str) -> DaybookResult<NaiveDateTime> {
    let s = input.trim();
    if let Some(dt) = parse_naive_datetime(s) {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| {
            DaybookError::InvalidInput(format!(
                "Invalid date/time '{}'. Expected YYYY-MM-DD HH:MM",
                input
            ))
        })
}

fn parse_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|dt| dt.with_nanosecond(0))
}
