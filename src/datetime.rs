//! Module containing functionality related to BSON DateTimes.

use std::{
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

/// A BSON UTC datetime: milliseconds since the Unix epoch.
///
/// BSON datetimes have millisecond precision; any finer-grained fraction of a
/// second is truncated (the same truncating behavior as the source this codec
/// is grounded on). `tz_aware` decode options elsewhere in this crate affect
/// only the host-language framing of the instant, not this internal
/// representation, which is always UTC.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DateTime(i64);

impl DateTime {
    /// Constructs a `DateTime` from milliseconds since the Unix epoch.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the number of milliseconds since the Unix epoch.
    pub const fn timestamp_millis(self) -> i64 {
        self.0
    }

    /// Returns the current time, truncated to millisecond precision.
    pub fn now() -> Self {
        let dur = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::from_millis(dur.as_millis() as i64)
    }
}

impl fmt::Debug for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTime({}ms)", self.0)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms since epoch", self.0)
    }
}
