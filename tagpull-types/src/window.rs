use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Absolute retrieval window in UTC.
///
/// Ordering is deliberately not enforced here: a misordered window is a
/// valid value that retrieval answers with an empty result and a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Inclusive lower bound requested from the historian.
    pub start: DateTime<Utc>,
    /// Inclusive upper bound requested from the historian.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window from its bounds.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// True when `start <= end`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Merge-time membership: `start < ts <= end`.
    #[must_use]
    pub fn contains_exclusive_start(&self, ts: DateTime<Utc>) -> bool {
        ts > self.start && ts <= self.end
    }
}
