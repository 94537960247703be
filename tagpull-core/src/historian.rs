use core::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::plan::QueryPlan;
use tagpull_types::{PointId, PointInfo, ServiceId, ServiceInfo, TagpullError, TimeWindow};

/// Status code returned by every cursor call.
///
/// Only [`StatusCode::OK`] means "a record is available"; every other code
/// ends the stream, whether it signals exhaustion or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCode(pub i32);

impl StatusCode {
    /// Success; for `next_record` this means more data follows.
    pub const OK: Self = Self(0);
    /// The request matched no records or the stream is exhausted.
    pub const NO_MORE_DATA: Self = Self(1);

    /// True for [`StatusCode::OK`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 == Self::OK.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque key identifying an open remote history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CursorHandle(pub u64);

/// Timestamp as delivered by the historian, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawTimestamp {
    /// Seconds since the Unix epoch.
    Epoch(i64),
    /// Service-formatted text in the service's local zone.
    Text(String),
}

/// Status as delivered by the historian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawStatus {
    /// Numeric status word.
    Code(u16),
    /// Status text (often space padded).
    Text(String),
}

/// One record pulled from an open cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Record timestamp.
    pub timestamp: RawTimestamp,
    /// Millisecond component for high-speed requests.
    pub msec: Option<u16>,
    /// Record value.
    pub value: f64,
    /// Record status.
    pub status: RawStatus,
}

/// Result of `Historian::open_query`.
///
/// A handle may accompany a failure code; the caller must still release it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOutcome {
    /// Remote handle, if one was allocated.
    pub handle: Option<CursorHandle>,
    /// Outcome of the open call.
    pub code: StatusCode,
}

impl OpenOutcome {
    /// Successful open with an allocated handle.
    #[must_use]
    pub const fn opened(handle: CursorHandle) -> Self {
        Self {
            handle: Some(handle),
            code: StatusCode::OK,
        }
    }

    /// Failed open without a handle.
    #[must_use]
    pub const fn failed(code: StatusCode) -> Self {
        Self { handle: None, code }
    }
}

/// Result of `Historian::next_record`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    /// The record, meaningful only when `code` is OK.
    pub record: Option<RawRecord>,
    /// Continuation code.
    pub code: StatusCode,
}

impl Fetched {
    /// A record followed by more data.
    #[must_use]
    pub const fn more(record: RawRecord) -> Self {
        Self {
            record: Some(record),
            code: StatusCode::OK,
        }
    }

    /// End of stream with the given terminating code.
    #[must_use]
    pub const fn end(code: StatusCode) -> Self {
        Self { record: None, code }
    }
}

/// Remote historian boundary.
///
/// Implementations wrap a concrete historian client (or a test double). The
/// cursor protocol is `open_query`, zero or more `next_record` calls, then
/// exactly one `release_query` per handle ever returned by `open_query`.
#[async_trait]
pub trait Historian: Send + Sync {
    /// Stable historian name for logs and middleware introspection.
    fn name(&self) -> &'static str;

    /// True iff the point exists in any connected service.
    async fn exists(&self, point: &PointId) -> bool;

    /// Open a history request for `point` over `window` using `plan`.
    async fn open_query(
        &self,
        point: &PointId,
        window: &TimeWindow,
        plan: &QueryPlan,
    ) -> OpenOutcome;

    /// Pull the next record from an open handle.
    async fn next_record(&self, handle: CursorHandle) -> Fetched;

    /// Release a handle. Synchronous so it can run from `Drop`.
    fn release_query(&self, handle: CursorHandle);

    /// Point description, if the point exists and has one.
    async fn describe(&self, point: &PointId) -> Option<String>;

    /// All services the historian is connected to.
    async fn list_services(&self) -> Result<Vec<ServiceInfo>, TagpullError>;

    /// All points configured in `service`.
    async fn list_points(&self, service: &ServiceId) -> Result<Vec<PointInfo>, TagpullError>;
}
