//! Minute-of-day arithmetic and the half-open interval model.
//!
//! All schedule times are `HH:MM` strings in the salon's local day;
//! internally everything is converted to minutes past midnight. Intervals
//! are half-open `[start, end)`, so a booking ending at 10:00 and one
//! starting at 10:00 do not collide.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Minutes in a service day.
pub const DAY_MIN: i32 = 24 * 60;

/// Parse a strict `HH:MM` string into minutes past midnight.
///
/// Rejects anything that does not match `^\d{2}:\d{2}$` or whose hour /
/// minute fall outside `[0,23]` / `[0,59]`.
pub fn to_minutes(hhmm: &str) -> Result<i32, CoreError> {
    let bytes = hhmm.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit();
    if !well_formed {
        return Err(CoreError::validation(format!("Invalid time format: {hhmm}")));
    }

    let hour = i32::from(bytes[0] - b'0') * 10 + i32::from(bytes[1] - b'0');
    let minute = i32::from(bytes[3] - b'0') * 10 + i32::from(bytes[4] - b'0');
    if hour > 23 || minute > 59 {
        return Err(CoreError::validation(format!("Time out of range: {hhmm}")));
    }

    Ok(hour * 60 + minute)
}

/// Format minutes past midnight as zero-padded `HH:MM`.
///
/// Values past midnight render as `24:xx` and beyond; durations are
/// expected to stay within a service day, so the rollover is implicit.
pub fn from_minutes(total: i32) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Compute an end time from a start time and a non-negative duration.
pub fn add_minutes(hhmm: &str, delta: i32) -> Result<String, CoreError> {
    debug_assert!(delta >= 0, "durations are positive in this system");
    Ok(from_minutes(to_minutes(hhmm)? + delta))
}

/// True if `s` is a well-formed, in-range `HH:MM` time.
pub fn is_valid_time(s: &str) -> bool {
    to_minutes(s).is_ok()
}

/// Parse a strict `YYYY-MM-DD` date, enforcing calendar validity
/// (e.g. `2026-02-30` is rejected).
pub fn parse_date(s: &str) -> Result<NaiveDate, CoreError> {
    if s.len() != 10 {
        return Err(CoreError::validation(format!("Invalid date format: {s}")));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| CoreError::validation(format!("Invalid date format: {s}")))
}

/// True if `s` is a valid calendar date in `YYYY-MM-DD` form.
pub fn is_valid_date(s: &str) -> bool {
    parse_date(s).is_ok()
}

/// A half-open minute interval `[start_min, end_min)` within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start_min: i32,
    pub end_min: i32,
}

impl Interval {
    pub fn new(start_min: i32, end_min: i32) -> Self {
        Self { start_min, end_min }
    }

    /// Strict half-open intersection. Touching intervals do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start_min < other.end_min && self.end_min > other.start_min
    }
}
