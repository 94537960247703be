use core::fmt;
use core::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TagpullError;

/// Server-side aggregation applied to a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationMode {
    /// Every recorded sample, unaggregated.
    Raw,
    /// Mean over each period.
    Average,
    /// Linear interpolation at each period boundary.
    Interpolated,
    /// Minimum over each period.
    Minimum,
    /// Maximum over each period.
    Maximum,
    /// Last known value at each period boundary.
    Snapshot,
}

impl AggregationMode {
    /// Stable lowercase identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Average => "average",
            Self::Interpolated => "interpolated",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Snapshot => "snapshot",
        }
    }

    /// Whether this mode aggregates over a period.
    #[must_use]
    pub const fn requires_period(self) -> bool {
        !matches!(self, Self::Raw)
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = TagpullError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "avg" | "average" => Ok(Self::Average),
            "interp" | "interpolated" => Ok(Self::Interpolated),
            "min" | "minimum" => Ok(Self::Minimum),
            "max" | "maximum" => Ok(Self::Maximum),
            "snap" | "snapshot" => Ok(Self::Snapshot),
            other => Err(TagpullError::InvalidArg(format!(
                "unknown aggregation mode '{other}'"
            ))),
        }
    }
}

/// Aggregation period in whole seconds.
///
/// Zero is representable so that callers can pass it through; request
/// validation rejects it for aggregating modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period(u32);

impl Period {
    /// Period of `secs` seconds.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Length in seconds.
    #[must_use]
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    /// True when the period is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Length as a [`Duration`].
    #[must_use]
    pub const fn to_duration(self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
