//! Builder for composing historians with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw historian:
//!
//! ```text
//! User Request
//!     ↓
//! Outermost Middleware (e.g., Cache - answers metadata lookups first)
//!     ↓
//! Inner Middleware (e.g., QuerySlots - waits for a free cursor slot)
//!     ↓
//! Raw Historian (talks to the remote service)
//! ```
//!
//! The `layers` vector stores middleware in **outermost-first** order (last
//! added = outermost) and `build()` applies them in reverse:
//!
//! ```text
//! builder.with_query_slots(..).with_cache(..)
//!
//! Storage: [Cache, QuerySlots]  (outermost first)
//! Applied:  Raw -> QuerySlots -> Cache
//! Result:   Cache(QuerySlots(Raw))
//! ```
//!
//! This matches [`MiddlewareStack`] where `layers[0]` is the outermost layer.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tagpull_core::{Historian, Middleware, TagpullError, ValidationContext};
use tagpull_types::{CacheConfig, MiddlewareLayer, MiddlewareStack, QuerySlotConfig};

use crate::cache::CacheMiddleware;
use crate::slots::QuerySlotMiddleware;

const CACHE: &str = "CacheMiddleware";
const SLOTS: &str = "QuerySlotMiddleware";

/// Generic middleware builder for composing a historian with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct HistorianBuilder {
    raw: Arc<dyn Historian>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl HistorianBuilder {
    /// Create a new builder from a raw, unwrapped historian.
    #[must_use]
    pub fn new(raw: Arc<dyn Historian>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace metadata caching at the outermost position.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CACHE);
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove caching if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE);
        self
    }

    /// Add or replace the query-slot limiter at the outermost position.
    #[must_use]
    pub fn with_query_slots(mut self, cfg: QuerySlotConfig) -> Self {
        self.layers.retain(|m| m.name() != SLOTS);
        self.layers.insert(0, Box::new(QuerySlotMiddleware::new(cfg)));
        self
    }

    /// Remove the query-slot limiter if present.
    #[must_use]
    pub fn without_query_slots(mut self) -> Self {
        self.layers.retain(|m| m.name() != SLOTS);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer<M: Middleware + 'static>(mut self, layer: M) -> Self {
        self.layers.insert(0, Box::new(layer));
        self
    }

    /// Export the current middleware stack configuration for inspection.
    ///
    /// The raw historian is appended as the innermost "layer".
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack::new();
        for layer in &self.layers {
            stack.push_inner(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        stack.push_inner(MiddlewareLayer::new(
            "RawHistorian",
            json!({ "name": self.raw.name() }),
        ));
        stack
    }

    /// Construct a builder from a raw historian and an explicit stack.
    ///
    /// Inverse of [`to_stack`](Self::to_stack). Unknown layer names are
    /// ignored; missing config fields take their defaults.
    #[must_use]
    pub fn from_stack(raw: Arc<dyn Historian>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn Middleware>> = Vec::new();
        for l in &stack.layers {
            match l.name.as_str() {
                CACHE => {
                    let defaults = CacheConfig::default();
                    let ttl = l
                        .config
                        .get("ttl_ms")
                        .and_then(serde_json::Value::as_u64)
                        .map_or(defaults.ttl, Duration::from_millis);
                    let max_entries = l
                        .config
                        .get("max_entries")
                        .and_then(serde_json::Value::as_u64)
                        .unwrap_or(defaults.max_entries);
                    layers.push(Box::new(CacheMiddleware::new(CacheConfig {
                        ttl,
                        max_entries,
                    })));
                }
                SLOTS => {
                    let max_open = l
                        .config
                        .get("max_open")
                        .and_then(serde_json::Value::as_u64)
                        .and_then(|v| usize::try_from(v).ok())
                        .unwrap_or(QuerySlotConfig::default().max_open);
                    layers.push(Box::new(QuerySlotMiddleware::new(QuerySlotConfig {
                        max_open,
                    })));
                }
                _ => {}
            }
        }
        Self { raw, layers }
    }

    /// Validate the stack and build the wrapped historian.
    ///
    /// Layers are applied innermost first, so `layers = [Cache, QuerySlots]`
    /// yields `Cache(QuerySlots(Raw))`.
    ///
    /// # Errors
    /// Returns `InvalidMiddlewareStack` when any layer rejects its placement.
    pub fn build(self) -> Result<Arc<dyn Historian>, TagpullError> {
        let names: Vec<&'static str> = self.layers.iter().map(|m| m.name()).collect();
        for (i, m) in self.layers.iter().enumerate() {
            m.validate(&ValidationContext::new(names.clone(), i))?;
        }
        let mut acc: Arc<dyn Historian> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        Ok(acc)
    }
}
