//! Tagpull retrieves point histories from a process historian and merges them.
//!
//! Overview
//! - Talks to any backend implementing [`tagpull_core::Historian`], a cursor
//!   protocol of open, fetch-next and release.
//! - Single-point retrieval returns a [`SeriesReport`]: time-sorted samples
//!   plus advisory warnings. Missing points, failed opens and empty windows
//!   never abort the call.
//! - Multi-point retrieval ([`Tagpull::merge`]) outer-joins raw series on
//!   timestamp, forward-fills gaps up to a row limit and optionally resamples
//!   onto a regular grid.
//! - Cursors are owned values that release their remote handle exactly once,
//!   including when a future is dropped mid-drain.
//!
//! Key behaviors and trade-offs
//! - Aggregation: raw, average, interpolated, minimum, maximum and snapshot
//!   modes map onto distinct remote operations; every mode but raw needs a
//!   positive period in seconds.
//! - Labels: explicit label, then the point description (opt-in, one extra
//!   lookup), then the point id. Duplicate labels in a merge get numeric
//!   suffixes in request order.
//! - Window verification drops merged rows outside `(start, end]`; disable it
//!   to keep whatever boundary samples the historian sends.
//! - Concurrency: merges retrieve up to `max_concurrent_points` series at once
//!   while keeping request order. Use [`QuerySlotMiddleware`] to cap open
//!   cursors per historian as well.
//!
//! Examples
//! Building a client over a layered historian:
//! ```rust,ignore
//! use std::sync::Arc;
//! use tagpull::{HistorianBuilder, LabelSource, Tagpull};
//!
//! let historian = HistorianBuilder::new(Arc::new(my_historian))
//!     .with_cache(tagpull::CacheConfig::default())
//!     .with_query_slots(tagpull::QuerySlotConfig { max_open: 4 })
//!     .build()?;
//!
//! let client = Tagpull::builder()
//!     .with_historian(historian)
//!     .label_source(LabelSource::Description)
//!     .build()?;
//! ```
//!
//! Fetching one series:
//! ```rust,ignore
//! use tagpull::{AggregationMode, Period, PointId, TimeWindow};
//!
//! let load = PointId::new("MDSSCSC1.ANVCALC.ADE1CA02")?;
//! let report = client
//!     .series(&load, TimeWindow::new(start, end), AggregationMode::Average, Some(Period::from_secs(60)))
//!     .await;
//! for w in &report.warnings {
//!     eprintln!("warning: {w}");
//! }
//! ```
//!
//! Merging several points:
//! ```rust,ignore
//! let report = client
//!     .merge()
//!     .points(&[load, egt])
//!     .window(TimeWindow::new(start, end))
//!     .sampling_rate(Period::from_secs(2))
//!     .run()
//!     .await?;
//! println!("{} rows x {} columns", report.table.len(), report.table.columns.len());
//! ```
//!
//! See `tagpull/demos/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Tagpull, TagpullBuilder};
pub use router::label::disambiguate_labels;
pub use router::merge::MergeBuilder;

pub use tagpull_middleware::{
    CacheMiddleware, CachingHistorian, HistorianBuilder, QuerySlotHistorian, QuerySlotMiddleware,
};

// Re-export core types for convenience
pub use tagpull_core::{
    AggregationMode, CacheConfig, Cell, Column, Cursor, CursorHandle, Fetched, HistOp, Historian,
    LabelSource, MergeReport, MergedTable, Middleware, OpenOutcome, Period, PointId, PointInfo,
    PointStatus, QueryPlan, QuerySlotConfig, RawRecord, RawStatus, RawTimestamp,
    RetrievalOptions, Sample, Series, SeriesReport, ServiceId, ServiceInfo, StatusCode,
    StatusFlags, TagpullConfig, TagpullError, TimeFormat, TimeWindow, ValidationContext,
};
pub use tagpull_types::{MiddlewareLayer, MiddlewareStack};

#[cfg(feature = "dataframe")]
pub use tagpull_core::ToDataFrame;
