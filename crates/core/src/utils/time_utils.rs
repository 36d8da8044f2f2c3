//! Timestamp handling for sync checkpoints and record stamps.
//!
//! All server timestamps are stored as naive UTC and cross the wire as
//! RFC 3339 with millisecond resolution. Stamping happens at the same
//! resolution so a client replaying an `updatedAt` it received from a
//! pull compares equal to the stored value instead of drifting by
//! sub-millisecond digits.

use chrono::{DateTime, Duration, DurationRound, NaiveDateTime, SecondsFormat, Utc};

use crate::errors::{Result, ValidationError};

/// Current UTC time, truncated to millisecond precision.
pub fn now_utc() -> NaiveDateTime {
    let now = Utc::now();
    now.duration_trunc(Duration::milliseconds(1))
        .unwrap_or(now)
        .naive_utc()
}

/// Formats a stored timestamp the way the client expects it.
pub fn to_rfc3339(timestamp: NaiveDateTime) -> String {
    timestamp
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a client-supplied ISO 8601 timestamp into naive UTC.
pub fn parse_rfc3339(input: &str) -> Result<NaiveDateTime> {
    DateTime::parse_from_rfc3339(input)
        .map(|parsed| parsed.with_timezone(&Utc).naive_utc())
        .map_err(|_| ValidationError::InvalidTimestamp(input.to_string()).into())
}
