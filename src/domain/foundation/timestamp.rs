//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Returns a new timestamp shifted forward by `duration`.
    pub fn plus(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }

    /// Returns a new timestamp shifted backward by `duration`.
    pub fn minus(&self, duration: Duration) -> Self {
        Self(self.0 - duration)
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// RFC 3339 rendering used in JSON responses.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn fixed() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn plus_and_minus_are_inverse() {
        let ts = fixed();
        let shifted = ts.plus(Duration::minutes(15)).minus(Duration::minutes(15));
        assert_eq!(ts, shifted);
    }

    #[test]
    fn duration_since_is_signed() {
        let earlier = fixed();
        let later = earlier.plus(Duration::seconds(90));

        assert_eq!(later.duration_since(&earlier), Duration::seconds(90));
        assert_eq!(earlier.duration_since(&later), Duration::seconds(-90));
    }

    #[test]
    fn ordering_helpers_agree_with_ord() {
        let earlier = fixed();
        let later = earlier.plus_secs(1);

        assert!(earlier.is_before(&later));
        assert!(later.is_after(&earlier));
        assert!(earlier < later);
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2024-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts.as_datetime().year(), 2024);
        assert_eq!(ts, fixed());
    }

    #[test]
    fn rfc3339_rendering() {
        assert_eq!(fixed().to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }
}
