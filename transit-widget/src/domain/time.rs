//! Timestamp handling for the trip planner.
//!
//! The planner is inconsistent about timestamp formats: trip-level
//! departure times come back ISO-style (`2025-04-21T09:10:00`), while
//! section times use a space separator (`2025-04-21 09:10`). Everything is
//! local wall-clock time for the transit agency, so we work in
//! `NaiveDateTime` throughout.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, Timelike};

/// How far before "now" a trip search starts.
///
/// Covers clock skew and keeps trips that have only just departed visible.
pub const GRACE_PERIOD_MINS: i64 = 30;

/// Formats accepted for offset-free timestamps, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Parse a planner timestamp into a local wall-clock time.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]` and RFC 3339
/// with an offset. Offset timestamps keep their own wall-clock reading.
///
/// # Examples
///
/// ```
/// use transit_widget::domain::parse_timestamp;
///
/// let a = parse_timestamp("2025-04-21T09:10:00").unwrap();
/// let b = parse_timestamp("2025-04-21 09:10").unwrap();
/// assert_eq!(a, b);
///
/// assert!(parse_timestamp("09:10").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimeError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(TimeError::new(s, "empty"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| TimeError::new(s, "unrecognised format"))
}

/// Start of a trip search window: now minus the grace period, at minute
/// granularity.
///
/// # Examples
///
/// ```
/// use transit_widget::domain::QueryStart;
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2025, 4, 21)
///     .unwrap()
///     .and_hms_opt(9, 5, 42)
///     .unwrap();
/// assert_eq!(QueryStart::from_now(now).to_param(), "2025-04-21_08-35");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryStart(NaiveDateTime);

impl QueryStart {
    /// Compute the search start for a request made at `now`.
    pub fn from_now(now: NaiveDateTime) -> Self {
        let start = now - Duration::minutes(GRACE_PERIOD_MINS);
        Self::at(start)
    }

    /// Use an explicit start time, truncated to the minute.
    pub fn at(time: NaiveDateTime) -> Self {
        let truncated = time
            - Duration::seconds(i64::from(time.second()))
            - Duration::nanoseconds(i64::from(time.nanosecond()));
        Self(truncated)
    }

    /// Returns the start as a timestamp.
    pub fn time(&self) -> NaiveDateTime {
        self.0
    }

    /// Format for the planner's `Date` parameter (`YYYY-MM-DD_HH-mm`).
    pub fn to_param(&self) -> String {
        self.0.format("%Y-%m-%d_%H-%M").to_string()
    }
}

impl fmt::Debug for QueryStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryStart({})", self.to_param())
    }
}

impl fmt::Display for QueryStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 21)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn parse_iso_forms() {
        assert_eq!(parse_timestamp("2025-04-21T09:10:00").unwrap(), at(9, 10, 0));
        assert_eq!(parse_timestamp("2025-04-21T09:10").unwrap(), at(9, 10, 0));
        assert_eq!(
            parse_timestamp("2025-04-21T09:10:00.000").unwrap(),
            at(9, 10, 0)
        );
    }

    #[test]
    fn parse_space_separated_forms() {
        assert_eq!(parse_timestamp("2025-04-21 09:10").unwrap(), at(9, 10, 0));
        assert_eq!(parse_timestamp("2025-04-21 09:10:30").unwrap(), at(9, 10, 30));
    }

    #[test]
    fn parse_offset_keeps_wall_clock() {
        assert_eq!(
            parse_timestamp("2025-04-21T09:10:00-04:00").unwrap(),
            at(9, 10, 0)
        );
    }

    #[test]
    fn reject_garbage() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("tomorrow").is_err());
        assert!(parse_timestamp("09:10").is_err());
        assert!(parse_timestamp("2025-13-01 09:10").is_err());

        let err = parse_timestamp("soon").unwrap_err();
        assert_eq!(err.to_string(), "invalid timestamp \"soon\": unrecognised format");
    }

    #[test]
    fn query_start_subtracts_grace_and_truncates() {
        let start = QueryStart::from_now(at(9, 5, 42));
        assert_eq!(start.time(), at(8, 35, 0));
        assert_eq!(start.to_param(), "2025-04-21_08-35");
    }

    #[test]
    fn query_start_crosses_midnight() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 10, 0)
            .unwrap();
        assert_eq!(QueryStart::from_now(now).to_param(), "2024-12-31_23-40");
    }

    #[test]
    fn query_start_pads_fields() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(7, 38, 0)
            .unwrap();
        assert_eq!(QueryStart::from_now(now).to_param(), "2025-03-04_07-08");
    }
}
