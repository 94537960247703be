use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tagpull_core::{
    CursorHandle, Fetched, Historian, Middleware, OpenOutcome, PointId, PointInfo, QueryPlan,
    ServiceId, ServiceInfo, TagpullError, TimeWindow,
};
use tagpull_types::CacheConfig;

/// Declarative wrapper that applies metadata caching when building a stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Create the middleware from a cache configuration.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn Historian>) -> Arc<dyn Historian> {
        let Self { cfg } = *self;
        Arc::new(CachingHistorian::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CacheMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ttl_ms": u64::try_from(self.cfg.ttl.as_millis()).unwrap_or(u64::MAX),
            "max_entries": self.cfg.max_entries,
        })
    }
}

// `None` means disabled (TTL=0).
struct Stores {
    exists: Option<Cache<PointId, bool>>,
    describe: Option<Cache<PointId, Option<String>>>,
    services: Option<Cache<(), Arc<Vec<ServiceInfo>>>>,
    points: Option<Cache<ServiceId, Arc<Vec<PointInfo>>>>,
}

/// Historian wrapper that memoizes metadata lookups.
///
/// Existence checks, descriptions and listings are cached for the configured
/// TTL; negative answers (`false`, `None`) are cached too. Listing errors are
/// never cached. Cursor operations pass straight through.
pub struct CachingHistorian {
    inner: Arc<dyn Historian>,
    stores: Stores,
}

impl CachingHistorian {
    fn store<K, V>(ttl: Duration, max_entries: u64) -> Option<Cache<K, V>>
    where
        K: std::hash::Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        if ttl.is_zero() || max_entries == 0 {
            return None;
        }
        Some(
            Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
        )
    }

    /// Wrap `inner` with caches sized and timed by `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn Historian>, cfg: &CacheConfig) -> Self {
        let stores = Stores {
            exists: Self::store(cfg.ttl, cfg.max_entries),
            describe: Self::store(cfg.ttl, cfg.max_entries),
            services: Self::store(cfg.ttl, 1),
            points: Self::store(cfg.ttl, cfg.max_entries),
        };
        Self { inner, stores }
    }

    /// Drop every cached answer.
    pub fn invalidate_all(&self) {
        if let Some(c) = &self.stores.exists {
            c.invalidate_all();
        }
        if let Some(c) = &self.stores.describe {
            c.invalidate_all();
        }
        if let Some(c) = &self.stores.services {
            c.invalidate_all();
        }
        if let Some(c) = &self.stores.points {
            c.invalidate_all();
        }
    }
}

#[async_trait]
impl Historian for CachingHistorian {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn exists(&self, point: &PointId) -> bool {
        if let Some(store) = &self.stores.exists {
            if let Some(hit) = store.get(point).await {
                return hit;
            }
            let v = self.inner.exists(point).await;
            store.insert(point.clone(), v).await;
            return v;
        }
        self.inner.exists(point).await
    }

    async fn open_query(
        &self,
        point: &PointId,
        window: &TimeWindow,
        plan: &QueryPlan,
    ) -> OpenOutcome {
        self.inner.open_query(point, window, plan).await
    }

    async fn next_record(&self, handle: CursorHandle) -> Fetched {
        self.inner.next_record(handle).await
    }

    fn release_query(&self, handle: CursorHandle) {
        self.inner.release_query(handle);
    }

    async fn describe(&self, point: &PointId) -> Option<String> {
        if let Some(store) = &self.stores.describe {
            if let Some(hit) = store.get(point).await {
                return hit;
            }
            let v = self.inner.describe(point).await;
            store.insert(point.clone(), v.clone()).await;
            return v;
        }
        self.inner.describe(point).await
    }

    async fn list_services(&self) -> Result<Vec<ServiceInfo>, TagpullError> {
        if let Some(store) = &self.stores.services {
            if let Some(hit) = store.get(&()).await {
                return Ok(hit.as_ref().clone());
            }
            let v = self.inner.list_services().await?;
            store.insert((), Arc::new(v.clone())).await;
            return Ok(v);
        }
        self.inner.list_services().await
    }

    async fn list_points(&self, service: &ServiceId) -> Result<Vec<PointInfo>, TagpullError> {
        if let Some(store) = &self.stores.points {
            if let Some(hit) = store.get(service).await {
                return Ok(hit.as_ref().clone());
            }
            let v = self.inner.list_points(service).await?;
            store.insert(service.clone(), Arc::new(v.clone())).await;
            return Ok(v);
        }
        self.inner.list_points(service).await
    }
}
