use std::sync::Arc;

use crate::historian::{CursorHandle, Historian, RawRecord};
use crate::plan::QueryPlan;
use tagpull_types::{PointId, TagpullError, TimeWindow};

/// Owned, single-use cursor over one remote history request.
///
/// The remote handle is released exactly once: by [`Cursor::release`], or by
/// `Drop` on any other exit path (early return, panic, dropped future).
pub struct Cursor {
    historian: Arc<dyn Historian>,
    handle: Option<CursorHandle>,
    point: PointId,
    operation: &'static str,
    finished: bool,
    accepted: usize,
}

impl Cursor {
    /// Open a cursor for `point` over `window` according to `plan`.
    ///
    /// # Errors
    /// Returns `TagpullError::Remote` if the historian rejects the request or
    /// reports success without allocating a handle. A handle that accompanies
    /// a failure code is released before returning.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tagpull::cursor::open",
            skip(historian, plan),
            fields(historian = historian.name(), point = %point, op = plan.operation_name()),
        )
    )]
    pub async fn open(
        historian: &Arc<dyn Historian>,
        point: &PointId,
        window: &TimeWindow,
        plan: &QueryPlan,
    ) -> Result<Self, TagpullError> {
        let outcome = historian.open_query(point, window, plan).await;
        let operation = plan.operation_name();
        match (outcome.code.is_ok(), outcome.handle) {
            (true, Some(handle)) => Ok(Self {
                historian: Arc::clone(historian),
                handle: Some(handle),
                point: point.clone(),
                operation,
                finished: false,
                accepted: 0,
            }),
            (ok, handle) => {
                if let Some(h) = handle {
                    historian.release_query(h);
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(code = outcome.code.0, released = handle.is_some(), "open failed");
                let code = if ok { -1 } else { outcome.code.0 };
                Err(TagpullError::remote(operation, code))
            }
        }
    }

    /// Point this cursor reads.
    #[must_use]
    pub const fn point(&self) -> &PointId {
        &self.point
    }

    /// Remote operation the cursor was opened with.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Records accepted so far.
    #[must_use]
    pub const fn accepted(&self) -> usize {
        self.accepted
    }

    /// True once the stream has ended; `next` will not contact the remote again.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Pull the next record.
    ///
    /// Returns `None` at the first non-continuing code and on every call
    /// after that. Exhaustion and mid-stream failure are not distinguished.
    pub async fn next(&mut self) -> Option<RawRecord> {
        if self.finished {
            return None;
        }
        let handle = self.handle?;
        let fetched = self.historian.next_record(handle).await;
        match (fetched.code.is_ok(), fetched.record) {
            (true, Some(record)) => {
                self.accepted += 1;
                Some(record)
            }
            _ => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    point = %self.point,
                    code = fetched.code.0,
                    accepted = self.accepted,
                    "cursor stream ended"
                );
                self.finished = true;
                None
            }
        }
    }

    /// Release the remote handle now.
    pub fn release(mut self) {
        self.release_handle();
    }

    fn release_handle(&mut self) {
        self.finished = true;
        if let Some(h) = self.handle.take() {
            self.historian.release_query(h);
        }
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        self.release_handle();
    }
}

impl core::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("historian", &self.historian.name())
            .field("handle", &self.handle)
            .field("point", &self.point)
            .field("operation", &self.operation)
            .field("finished", &self.finished)
            .finish()
    }
}

/// Read every remaining record from `cursor`, then release it.
pub async fn drain(mut cursor: Cursor) -> Vec<RawRecord> {
    let mut out = Vec::new();
    while let Some(record) = cursor.next().await {
        out.push(record);
    }
    cursor.release();
    out
}
