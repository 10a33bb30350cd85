//! Requested booking interval

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` interval.
///
/// `start < end` is not checked here; the backend owns that rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window of `length` beginning at `start`
    #[must_use]
    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> Self {
        Self {
            start,
            end: start + length,
        }
    }

    /// Two windows conflict iff `a.start < b.end AND a.end > b.start`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Start as an RFC 3339 string with a `Z` suffix
    #[must_use]
    pub fn start_param(&self) -> String {
        format_timestamp(self.start)
    }

    /// End as an RFC 3339 string with a `Z` suffix
    #[must_use]
    pub fn end_param(&self) -> String {
        format_timestamp(self.end)
    }
}

/// Format a timestamp the way query filters expect it.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
