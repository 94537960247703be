//! Report envelopes produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::error::TagpullError;
use crate::sample::Series;
use crate::table::MergedTable;

/// Summary of a single-point retrieval.
///
/// The series is always present; it is empty when the point was missing,
/// the request was malformed or the window held no data. The reason is in
/// `warnings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    /// Retrieved samples.
    pub series: Series,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<TagpullError>,
}

impl SeriesReport {
    /// True if any warning is actionable.
    #[must_use]
    pub fn has_actionable_warnings(&self) -> bool {
        self.warnings.iter().any(TagpullError::is_actionable)
    }
}

/// Summary of a multi-point merge.
///
/// Wraps the merged table (possibly empty) and the warnings of every point
/// that was skipped or degraded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MergeReport {
    /// Time-aligned merged table.
    pub table: MergedTable,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<TagpullError>,
}
