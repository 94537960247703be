//! Middleware trait for wrapping `Historian` implementations.

use std::sync::Arc;

use crate::historian::Historian;
use tagpull_types::TagpullError;

/// Read-only view of a middleware stack handed to [`Middleware::validate`].
#[derive(Debug, Clone)]
pub struct ValidationContext {
    names: Vec<&'static str>,
    position: usize,
}

impl ValidationContext {
    /// Context for the layer at `position` in an outermost-first stack.
    #[must_use]
    pub const fn new(names: Vec<&'static str>, position: usize) -> Self {
        Self { names, position }
    }

    /// Layer names, outermost first.
    #[must_use]
    pub fn layer_names(&self) -> &[&'static str] {
        &self.names
    }

    /// Index of the layer being validated (0 is outermost).
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// True if a layer with `name` is anywhere in the stack.
    #[must_use]
    pub fn has_layer(&self, name: &str) -> bool {
        self.names.contains(&name)
    }

    /// True if a layer with `name` sits inside (closer to the raw historian
    /// than) the layer being validated.
    #[must_use]
    pub fn has_inner(&self, name: &str) -> bool {
        self.names
            .iter()
            .skip(self.position + 1)
            .any(|n| *n == name)
    }
}

/// Trait implemented by historian middleware layers.
///
/// A middleware consumes an inner `Historian` and returns a wrapped historian
/// that augments or restricts behavior (e.g., metadata caching, query slots).
pub trait Middleware: Send + Sync {
    /// Apply this middleware to wrap an inner historian and return the wrapped historian.
    fn apply(self: Box<Self>, inner: Arc<dyn Historian>) -> Arc<dyn Historian>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;

    /// Check placement requirements against the rest of the stack.
    ///
    /// # Errors
    /// Returns `TagpullError::InvalidMiddlewareStack` when the layer cannot
    /// work in this stack.
    fn validate(&self, _ctx: &ValidationContext) -> Result<(), TagpullError> {
        Ok(())
    }
}
