//! Tagpull-specific data transfer objects and configuration primitives.
//!
//! Everything here is plain data: identifiers, windows, samples, merged
//! tables and the report envelopes returned by the `tagpull` orchestrator.
//! Retrieval and merge logic lives in `tagpull-core` and `tagpull`.
#![warn(missing_docs)]

mod config;
mod error;
mod metadata;
mod middleware;
mod mode;
mod point;
mod reports;
mod sample;
mod status;
mod table;
mod window;

pub use config::{
    CacheConfig, LabelSource, QuerySlotConfig, RetrievalOptions, TagpullConfig, TimeFormat,
};
pub use error::TagpullError;
pub use metadata::{PointInfo, ServiceInfo};
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use mode::{AggregationMode, Period};
pub use point::{PointId, ServiceId, normalize_identifier};
pub use reports::{MergeReport, SeriesReport};
pub use sample::{Sample, Series};
pub use status::{PointStatus, StatusFlags};
pub use table::{Cell, Column, MergedTable};
pub use window::TimeWindow;
