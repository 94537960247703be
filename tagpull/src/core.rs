use std::sync::Arc;

use chrono_tz::Tz;
use tagpull_core::{Historian, LabelSource, Period, TagpullConfig, TagpullError, TimeFormat};

/// Client that retrieves and merges historian series through one historian.
///
/// The client owns its historian handle; there is no process-wide connection.
/// Reconnecting means building a new client with [`Tagpull::with_historian`].
#[derive(Clone)]
pub struct Tagpull {
    pub(crate) historian: Arc<dyn Historian>,
    pub(crate) cfg: TagpullConfig,
}

/// Builder for constructing a `Tagpull` client with custom configuration.
pub struct TagpullBuilder {
    historian: Option<Arc<dyn Historian>>,
    cfg: TagpullConfig,
}

impl Default for TagpullBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TagpullBuilder {
    /// Create a new builder with the default [`TagpullConfig`].
    ///
    /// Behavior and trade-offs:
    /// - Starts without a historian; you must provide one via [`Self::with_historian`].
    /// - Defaults: fill limit 600 rows, no resampling, window verification on,
    ///   point-id labels, four points retrieved concurrently, UTC text timestamps.
    #[must_use]
    pub fn new() -> Self {
        Self {
            historian: None,
            cfg: TagpullConfig::default(),
        }
    }

    /// Set the historian to query. A later call replaces an earlier one.
    ///
    /// Wrap the historian with [`crate::HistorianBuilder`] first to add caching
    /// or query-slot limiting.
    #[must_use]
    pub fn with_historian(mut self, historian: Arc<dyn Historian>) -> Self {
        self.historian = Some(historian);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: TagpullConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Maximum consecutive forward-filled rows per column in a merge.
    ///
    /// Behavior and trade-offs:
    /// - Larger limits hide long outages behind stale values.
    /// - Zero disables filling entirely; gaps stay unset.
    #[must_use]
    pub const fn fill_limit(mut self, rows: usize) -> Self {
        self.cfg.fill_limit = rows;
        self
    }

    /// Resample merged tables onto a regular grid with this period.
    #[must_use]
    pub const fn sampling_rate(mut self, period: Period) -> Self {
        self.cfg.sampling_rate = Some(period);
        self
    }

    /// Drop merged rows outside the requested `(start, end]` window.
    #[must_use]
    pub const fn verify_window(mut self, yes: bool) -> Self {
        self.cfg.verify_window = yes;
        self
    }

    /// Default label source for series without an explicit label.
    ///
    /// `LabelSource::Description` costs one extra metadata lookup per point.
    #[must_use]
    pub const fn label_source(mut self, src: LabelSource) -> Self {
        self.cfg.label_source = src;
        self
    }

    /// Upper bound on points retrieved concurrently during a merge.
    ///
    /// Output order never depends on this value.
    #[must_use]
    pub const fn max_concurrent_points(mut self, n: usize) -> Self {
        self.cfg.max_concurrent_points = n;
        self
    }

    /// Zone used to interpret text timestamps sent by the service.
    #[must_use]
    pub const fn time_zone(mut self, tz: Tz) -> Self {
        self.cfg.time_zone = tz;
        self
    }

    /// Default timestamp encoding requested from the historian.
    #[must_use]
    pub const fn time_format(mut self, fmt: TimeFormat) -> Self {
        self.cfg.time_format = fmt;
        self
    }

    /// Build the `Tagpull` client.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no historian was provided, if
    /// `max_concurrent_points` is zero, or if the sampling rate is zero.
    pub fn build(self) -> Result<Tagpull, TagpullError> {
        let Some(historian) = self.historian else {
            return Err(TagpullError::InvalidArg(
                "no historian registered; add one via with_historian(...)".to_string(),
            ));
        };
        if self.cfg.max_concurrent_points == 0 {
            return Err(TagpullError::InvalidArg(
                "max_concurrent_points must be at least 1".to_string(),
            ));
        }
        if let Some(p) = self.cfg.sampling_rate
            && !p.is_positive()
        {
            return Err(TagpullError::InvalidArg(
                "sampling_rate must be positive".to_string(),
            ));
        }
        Ok(Tagpull {
            historian,
            cfg: self.cfg,
        })
    }
}

impl Tagpull {
    /// Start building a new `Tagpull` client.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use tagpull::{LabelSource, Tagpull};
    ///
    /// let client = Tagpull::builder()
    ///     .with_historian(Arc::new(my_historian))
    ///     .label_source(LabelSource::Description)
    ///     .fill_limit(120)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TagpullBuilder {
        TagpullBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TagpullConfig {
        &self.cfg
    }

    /// Historian this client talks to.
    #[must_use]
    pub const fn historian(&self) -> &Arc<dyn Historian> {
        &self.historian
    }

    /// A new client with the same configuration bound to another historian.
    ///
    /// Used to reconnect: the old client keeps working until dropped.
    #[must_use]
    pub fn with_historian(&self, historian: Arc<dyn Historian>) -> Self {
        Self {
            historian,
            cfg: self.cfg.clone(),
        }
    }
}

impl std::fmt::Debug for Tagpull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tagpull")
            .field("historian", &self.historian.name())
            .field("cfg", &self.cfg)
            .finish()
    }
}
