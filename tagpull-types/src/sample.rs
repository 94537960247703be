use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::point::PointId;
use crate::status::PointStatus;

/// One timestamped observation of a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Observation time (UTC).
    pub ts: DateTime<Utc>,
    /// Observed value.
    pub value: f64,
    /// Status reported alongside the value.
    pub status: PointStatus,
}

/// Time-ordered samples for a single point, tagged with a column label.
///
/// Duplicate timestamps may appear and keep their retrieval order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Point the samples belong to.
    pub point: PointId,
    /// Column label used when the series is tabulated.
    pub label: String,
    /// Samples in ascending timestamp order.
    pub samples: Vec<Sample>,
}

impl Series {
    /// An empty series labeled with the point id itself.
    #[must_use]
    pub fn empty(point: PointId) -> Self {
        let label = point.to_string();
        Self {
            point,
            label,
            samples: Vec::new(),
        }
    }

    /// True when the series holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Column name for the status companion of this series.
    #[must_use]
    pub fn status_label(&self) -> String {
        format!("{} Status", self.label)
    }

    /// Iterate over sample values in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }
}
