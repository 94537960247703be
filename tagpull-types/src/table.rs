use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::point::PointId;
use crate::status::PointStatus;

/// A populated cell: value and status always travel together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Observed or forward-filled value.
    pub value: f64,
    /// Status of the observation the value came from.
    pub status: PointStatus,
}

/// One point's column in a [`MergedTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Point that produced this column.
    pub point: PointId,
    /// Value column name.
    pub label: String,
    /// One entry per index row; `None` marks an unset cell.
    pub cells: Vec<Option<Cell>>,
}

impl Column {
    /// Status column name: `"<label> Status"`.
    #[must_use]
    pub fn status_label(&self) -> String {
        format!("{} Status", self.label)
    }

    /// Values by row; unset cells are `None`.
    #[must_use]
    pub fn values(&self) -> Vec<Option<f64>> {
        self.cells.iter().map(|c| c.as_ref().map(|c| c.value)).collect()
    }

    /// Count of populated cells.
    #[must_use]
    pub fn populated(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Time-aligned table of several points.
///
/// `index` is strictly increasing and every column has exactly
/// `index.len()` cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MergedTable {
    /// Row timestamps (UTC), strictly increasing.
    pub index: Vec<DateTime<Utc>>,
    /// Columns in request order.
    pub columns: Vec<Column>,
}

impl MergedTable {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Value column labels in column order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Look up a column by its value label.
    #[must_use]
    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    /// Look up a column by the point that produced it.
    #[must_use]
    pub fn column_for(&self, point: &PointId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.point == point)
    }
}
