//! Time-series utilities used by the merge engine.
//!
//! Modules include:
//! - `series`: per-series ordering and first-wins deduplication
//! - `join`: outer join of series into a table and window clipping
//! - `fill`: bounded forward-fill of table columns
//! - `resample`: regular-grid resampling of merged tables
//! - `frame`: `polars` export (feature `dataframe`)
/// Bounded forward-fill.
pub mod fill;
/// Outer join and window clipping.
pub mod join;
/// Grid resampling of merged tables.
pub mod resample;
/// Per-series ordering and deduplication helpers.
pub mod series;

/// DataFrame export of merged tables.
#[cfg(feature = "dataframe")]
pub mod frame;
