use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tagpull_core::{
    CursorHandle, Fetched, Historian, Middleware, OpenOutcome, PointId, PointInfo, QueryPlan,
    ServiceId, ServiceInfo, StatusCode, TagpullError, TimeWindow,
};
use tagpull_types::QuerySlotConfig;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Declarative wrapper that caps concurrently open cursors.
pub struct QuerySlotMiddleware {
    cfg: QuerySlotConfig,
}

impl QuerySlotMiddleware {
    /// Create the middleware from a slot configuration.
    #[must_use]
    pub const fn new(cfg: QuerySlotConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for QuerySlotMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn Historian>) -> Arc<dyn Historian> {
        Arc::new(QuerySlotHistorian::new(inner, self.cfg))
    }

    fn name(&self) -> &'static str {
        "QuerySlotMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({ "max_open": self.cfg.max_open })
    }

    fn validate(&self, _ctx: &tagpull_core::ValidationContext) -> Result<(), TagpullError> {
        if self.cfg.max_open == 0 {
            return Err(TagpullError::InvalidMiddlewareStack {
                message: "QuerySlotMiddleware needs max_open of at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Historian wrapper that holds one semaphore permit per open cursor.
///
/// `open_query` waits for a free slot before reaching the inner historian.
/// The permit is returned when the handle is released, or right away when
/// the open produced no handle.
pub struct QuerySlotHistorian {
    inner: Arc<dyn Historian>,
    slots: Arc<Semaphore>,
    held: Mutex<HashMap<CursorHandle, OwnedSemaphorePermit>>,
    max_open: usize,
}

impl QuerySlotHistorian {
    /// Wrap `inner`, allowing at most `cfg.max_open` cursors at once.
    #[must_use]
    pub fn new(inner: Arc<dyn Historian>, cfg: QuerySlotConfig) -> Self {
        let max_open = cfg.max_open.max(1);
        Self {
            inner,
            slots: Arc::new(Semaphore::new(max_open)),
            held: Mutex::new(HashMap::new()),
            max_open,
        }
    }

    /// Configured slot count.
    #[must_use]
    pub const fn max_open(&self) -> usize {
        self.max_open
    }

    /// Slots not held by an open cursor right now.
    #[must_use]
    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }

    fn held(&self) -> MutexGuard<'_, HashMap<CursorHandle, OwnedSemaphorePermit>> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Historian for QuerySlotHistorian {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn exists(&self, point: &PointId) -> bool {
        self.inner.exists(point).await
    }

    async fn open_query(
        &self,
        point: &PointId,
        window: &TimeWindow,
        plan: &QueryPlan,
    ) -> OpenOutcome {
        #[cfg(feature = "tracing")]
        {
            if self.slots.available_permits() == 0 {
                tracing::debug!(point = %point, max_open = self.max_open, "waiting for a query slot");
            }
        }
        let Ok(permit) = Arc::clone(&self.slots).acquire_owned().await else {
            return OpenOutcome::failed(StatusCode(-1));
        };
        let outcome = self.inner.open_query(point, window, plan).await;
        if let Some(handle) = outcome.handle {
            self.held().insert(handle, permit);
        }
        outcome
    }

    async fn next_record(&self, handle: CursorHandle) -> Fetched {
        self.inner.next_record(handle).await
    }

    fn release_query(&self, handle: CursorHandle) {
        self.inner.release_query(handle);
        self.held().remove(&handle);
    }

    async fn describe(&self, point: &PointId) -> Option<String> {
        self.inner.describe(point).await
    }

    async fn list_services(&self) -> Result<Vec<ServiceInfo>, TagpullError> {
        self.inner.list_services().await
    }

    async fn list_points(&self, service: &ServiceId) -> Result<Vec<PointInfo>, TagpullError> {
        self.inner.list_points(service).await
    }
}
