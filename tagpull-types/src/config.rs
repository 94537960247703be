//! Configuration types shared across the orchestrator and middleware.

use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::mode::Period;

/// Where a series takes its column label from when none is given explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LabelSource {
    /// Use the normalized point id.
    #[default]
    PointId,
    /// Use the point's description, falling back to the point id.
    Description,
}

/// Timestamp encoding requested from the historian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TimeFormat {
    /// Service-local text timestamps, interpreted in the configured zone.
    #[default]
    Text,
    /// Seconds since the Unix epoch (UTC).
    UtcEpoch,
}

/// Global configuration for the `Tagpull` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagpullConfig {
    /// Maximum consecutive forward-filled rows per column in a merge.
    pub fill_limit: usize,
    /// Optional resample period for merged tables.
    pub sampling_rate: Option<Period>,
    /// Drop merged rows outside `(start, end]`.
    pub verify_window: bool,
    /// Default label source for series and merged columns.
    pub label_source: LabelSource,
    /// Upper bound on points retrieved concurrently during a merge.
    pub max_concurrent_points: usize,
    /// Zone used to interpret text timestamps.
    pub time_zone: Tz,
    /// Default timestamp encoding requested from the historian.
    pub time_format: TimeFormat,
}

impl Default for TagpullConfig {
    fn default() -> Self {
        Self {
            fill_limit: 600,
            sampling_rate: None,
            verify_window: true,
            label_source: LabelSource::PointId,
            max_concurrent_points: 4,
            time_zone: Tz::UTC,
            time_format: TimeFormat::Text,
        }
    }
}

/// Per-call overrides for a single-series retrieval.
///
/// Unset fields fall back to the orchestrator's [`TagpullConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalOptions {
    /// Explicit column label; wins over any label source.
    pub label: Option<String>,
    /// Label source override.
    pub label_source: Option<LabelSource>,
    /// Request millisecond-resolution raw samples.
    pub high_speed: bool,
    /// Timestamp encoding override.
    pub time_format: Option<TimeFormat>,
    /// Zone override for text timestamps.
    pub time_zone: Option<Tz>,
}

impl RetrievalOptions {
    /// Options with an explicit label.
    #[must_use]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Set the label source override.
    #[must_use]
    pub const fn with_label_source(mut self, src: LabelSource) -> Self {
        self.label_source = Some(src);
        self
    }

    /// Request millisecond-resolution samples.
    #[must_use]
    pub const fn high_speed(mut self, on: bool) -> Self {
        self.high_speed = on;
        self
    }

    /// Set the timestamp encoding override.
    #[must_use]
    pub const fn with_time_format(mut self, fmt: TimeFormat) -> Self {
        self.time_format = Some(fmt);
        self
    }

    /// Set the time zone override.
    #[must_use]
    pub const fn with_time_zone(mut self, tz: Tz) -> Self {
        self.time_zone = Some(tz);
        self
    }
}

/// Configuration for the metadata cache middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live of each cached answer.
    pub ttl: Duration,
    /// Maximum cached entries per lookup kind.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 10_000,
        }
    }
}

/// Configuration for the query-slot limiter middleware.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuerySlotConfig {
    /// Maximum concurrently open history cursors.
    pub max_open: usize,
}

impl Default for QuerySlotConfig {
    fn default() -> Self {
        Self { max_open: 8 }
    }
}
