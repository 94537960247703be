//! tagpull-core
//!
//! Core traits and utilities shared across the tagpull workspace.
//!
//! - `historian`: the `Historian` trait describing the remote cursor protocol.
//! - `cursor`: an owned cursor that guarantees exactly one release per open.
//! - `plan`: maps an aggregation mode and period to a remote operation.
//! - `record`: converts raw historian records into typed samples.
//! - `timeseries`: dedupe, outer join, window clipping, bounded forward-fill
//!   and resampling of merged tables.
//!
//! Async runtime (Tokio)
//! ---------------------
//! The historian trait is async and implementations are expected to run on a
//! Tokio 1.x runtime. `Historian::release_query` is synchronous so the cursor
//! can release its handle from `Drop`, including when a retrieval future is
//! dropped mid-drain.
#![warn(missing_docs)]

/// Owned cursor over a remote history request.
pub mod cursor;
/// The `Historian` trait and the raw wire-level types it exchanges.
pub mod historian;
/// Middleware trait implemented by historian wrappers.
pub mod middleware;
/// Mode and period to remote-operation mapping.
pub mod plan;
/// Raw record normalization.
pub mod record;
/// Time-series utilities for merging and resampling.
pub mod timeseries;

pub use cursor::{Cursor, drain};
pub use historian::{
    CursorHandle, Fetched, Historian, OpenOutcome, RawRecord, RawStatus, RawTimestamp, StatusCode,
};
pub use middleware::{Middleware, ValidationContext};
pub use plan::{HistOp, QueryPlan};
pub use record::{normalize_record, parse_text_timestamp};
pub use timeseries::fill::forward_fill;
pub use timeseries::join::{clip_window, outer_join};
pub use timeseries::resample::resample;
pub use timeseries::series::{dedup_first, sort_samples};
pub use tagpull_types::*;

#[cfg(feature = "dataframe")]
pub use timeseries::frame::ToDataFrame;
