//! Instant type for work log timekeeping.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// An instant in time, stored as milliseconds since the Unix epoch.
///
/// This is a newtype wrapper around the raw millisecond counts that host
/// snapshots store, so foreign data round-trips unchanged while the engine
/// gets typed arithmetic.
///
/// # Example
///
/// ```rust
/// use tuinlog_core::types::Timestamp;
///
/// let start = Timestamp::from_millis(1_000);
/// let end = start + 90_000;
/// assert_eq!(end - start, 90_000);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from raw epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Returns the current wall clock instant.
    #[must_use]
    pub fn now() -> Self {
        Timestamp(Utc::now().timestamp_millis())
    }

    /// Creates a timestamp from a UTC datetime.
    #[must_use]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Timestamp(datetime.timestamp_millis())
    }

    /// Creates a timestamp for a clock time on a calendar day, read as UTC.
    #[must_use]
    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Timestamp(date.and_time(time).and_utc().timestamp_millis())
    }

    /// Returns the raw epoch milliseconds.
    #[must_use]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Converts back to a UTC datetime, if the instant is in chrono's range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }

    /// Calendar day of the instant, saturating at chrono's range ends.
    #[must_use]
    pub fn date_naive(&self) -> NaiveDate {
        self.to_datetime().map_or(NaiveDate::MIN, |dt| dt.date_naive())
    }

    /// Milliseconds elapsed since `earlier`, clamped at zero.
    #[must_use]
    pub fn since(&self, earlier: Timestamp) -> i64 {
        (self.0 - earlier.0).max(0)
    }

    /// Returns the minimum of two timestamps.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Returns the maximum of two timestamps.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Add<i64> for Timestamp {
    type Output = Self;

    /// Shifts the instant forward by milliseconds.
    fn add(self, millis: i64) -> Self::Output {
        Timestamp(self.0 + millis)
    }
}

impl Sub<i64> for Timestamp {
    type Output = Self;

    /// Shifts the instant backward by milliseconds.
    fn sub(self, millis: i64) -> Self::Output {
        Timestamp(self.0 - millis)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = i64;

    /// Returns the signed millisecond span between two instants.
    fn sub(self, other: Timestamp) -> Self::Output {
        self.0 - other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let t = Timestamp::from_millis(10_000);
        assert_eq!((t + 5_000).millis(), 15_000);
        assert_eq!((t - 5_000).millis(), 5_000);
        assert_eq!(t + 5_000 - t, 5_000);
        assert_eq!(t - (t + 5_000), -5_000);
    }

    #[test]
    fn test_since_clamps() {
        let t = Timestamp::from_millis(10_000);
        assert_eq!((t + 500).since(t), 500);
        assert_eq!(t.since(t + 500), 0);
    }

    #[test]
    fn test_at_clock_time() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let half_past_eight = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
        let noon_half = NaiveTime::from_hms_opt(12, 30, 0).unwrap();

        let start = Timestamp::at(date, half_past_eight);
        let end = Timestamp::at(date, noon_half);
        // 4 hours apart
        assert_eq!(end - start, 4 * 3_600_000);
    }

    #[test]
    fn test_date_naive() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let late = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!(Timestamp::at(date, late).date_naive(), date);
    }

    #[test]
    fn test_ordering_and_min_max() {
        let a = Timestamp::from_millis(1);
        let b = Timestamp::from_millis(2);
        assert!(a < b);
        assert_eq!(a.min(b), a);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn test_serde_transparent() {
        let t = Timestamp::from_millis(1_700_000_000_000);
        let json = serde_json::to_string(&t).unwrap();
        // Serializes as the bare number the host snapshot stores
        assert_eq!(json, "1700000000000");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, t);
    }

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let time = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
        let t = Timestamp::at(date, time);
        assert_eq!(format!("{}", t), "2025-03-10 08:30:00");
    }
}
