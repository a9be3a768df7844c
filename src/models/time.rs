use serde::*;

/// Milliseconds per hour, the native step of the upstream forecast grid.
pub const HOUR_MS: i64 = 3_600_000;

/// Instant expressed as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimestampMs(i64);

impl TimestampMs {
    /// Create a new timestamp from epoch milliseconds.
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    /// Raw value in epoch milliseconds.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Offset this instant by a signed number of milliseconds.
    pub fn offset_ms(&self, delta: i64) -> Self {
        Self(self.0 + delta)
    }

    /// Absolute distance to another instant, in milliseconds.
    pub fn distance_to(&self, other: TimestampMs) -> i64 {
        (self.0 - other.0).abs()
    }

    /// Convert to chrono DateTime<Utc>.
    pub fn to_datetime(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp_millis(self.0).unwrap_or(chrono::DateTime::UNIX_EPOCH)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

impl From<i64> for TimestampMs {
    fn from(millis: i64) -> Self {
        TimestampMs::new(millis)
    }
}

impl std::fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_datetime().to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::{TimestampMs, HOUR_MS};

    #[test]
    fn test_timestamp_new() {
        let t = TimestampMs::new(1_700_000_000_000);
        assert_eq!(t.value(), 1_700_000_000_000);
    }

    #[test]
    fn test_timestamp_from_i64() {
        let t: TimestampMs = 42i64.into();
        assert_eq!(t.value(), 42);
    }

    #[test]
    fn test_timestamp_ordering() {
        let earlier = TimestampMs::new(1000);
        let later = TimestampMs::new(2000);

        assert!(earlier < later);
        assert!(later > earlier);
    }

    #[test]
    fn test_timestamp_offset() {
        let t = TimestampMs::new(0);
        assert_eq!(t.offset_ms(HOUR_MS).value(), HOUR_MS);
        assert_eq!(t.offset_ms(-500).value(), -500);
    }

    #[test]
    fn test_timestamp_distance_symmetric() {
        let a = TimestampMs::new(1000);
        let b = TimestampMs::new(4000);

        assert_eq!(a.distance_to(b), 3000);
        assert_eq!(b.distance_to(a), 3000);
    }

    #[test]
    fn test_timestamp_datetime_roundtrip() {
        let original = TimestampMs::new(1_700_000_123_456);
        let roundtrip = TimestampMs::from_datetime(original.to_datetime());
        assert_eq!(original, roundtrip);
    }

    #[test]
    fn test_timestamp_epoch() {
        let t = TimestampMs::new(0);
        assert_eq!(t.to_datetime(), chrono::DateTime::UNIX_EPOCH);
    }
}
