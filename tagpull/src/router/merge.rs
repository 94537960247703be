use futures::stream::{self, StreamExt};

use crate::Tagpull;
use crate::router::label::disambiguate_labels;
use tagpull_core::{
    AggregationMode, LabelSource, MergeReport, MergedTable, Period, PointId, RetrievalOptions,
    Series, SeriesReport, TagpullError, TimeWindow, clip_window, dedup_first, forward_fill,
    outer_join, resample,
};

/// Builder that retrieves several points and merges them into one table.
///
/// Defaults for fill limit, sampling rate, window verification and label
/// source come from the client's configuration.
pub struct MergeBuilder<'a> {
    pub(crate) tagpull: &'a Tagpull,
    pub(crate) points: Vec<(PointId, Option<String>)>,
    pub(crate) window: Option<TimeWindow>,
    pub(crate) sampling_rate: Option<Period>,
    pub(crate) fill_limit: usize,
    pub(crate) verify_window: bool,
    pub(crate) label_source: LabelSource,
}

impl<'a> MergeBuilder<'a> {
    /// Create a new builder bound to a `Tagpull` client.
    #[must_use]
    pub fn new(tagpull: &'a Tagpull) -> Self {
        Self {
            tagpull,
            points: Vec::new(),
            window: None,
            sampling_rate: tagpull.cfg.sampling_rate,
            fill_limit: tagpull.cfg.fill_limit,
            verify_window: tagpull.cfg.verify_window,
            label_source: tagpull.cfg.label_source,
        }
    }

    /// Replace the point list. Column order follows this order.
    ///
    /// A point may appear more than once; each occurrence becomes its own
    /// column and repeated labels get a numeric suffix.
    #[must_use]
    pub fn points(mut self, points: &[PointId]) -> Self {
        self.points = points.iter().map(|p| (p.clone(), None)).collect();
        self
    }

    /// Append one point.
    #[must_use]
    pub fn point(mut self, point: PointId) -> Self {
        self.points.push((point, None));
        self
    }

    /// Append one point with an explicit column label.
    #[must_use]
    pub fn labeled_point(mut self, point: PointId, label: impl Into<String>) -> Self {
        self.points.push((point, Some(label.into())));
        self
    }

    /// Set the retrieval window.
    #[must_use]
    pub const fn window(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Resample the merged table with this period.
    #[must_use]
    pub const fn sampling_rate(mut self, period: Period) -> Self {
        self.sampling_rate = Some(period);
        self
    }

    /// Keep the native timestamps (no resampling).
    #[must_use]
    pub const fn no_resample(mut self) -> Self {
        self.sampling_rate = None;
        self
    }

    /// Maximum consecutive forward-filled rows per column.
    #[must_use]
    pub const fn fill_limit(mut self, rows: usize) -> Self {
        self.fill_limit = rows;
        self
    }

    /// Drop rows outside `(start, end]` after joining.
    #[must_use]
    pub const fn verify_window(mut self, yes: bool) -> Self {
        self.verify_window = yes;
        self
    }

    /// Label source for points without an explicit label.
    #[must_use]
    pub const fn label_source(mut self, src: LabelSource) -> Self {
        self.label_source = src;
        self
    }

    /// Retrieve every point and merge the results.
    ///
    /// Behavior and trade-offs:
    /// - Points are retrieved raw, at most `max_concurrent_points` at a time;
    ///   results are consumed in request order so column order and label
    ///   suffixes are reproducible.
    /// - A point that fails or returns nothing is skipped and its warnings are
    ///   collected; one bad point never aborts the batch.
    /// - Each series keeps the first sample per timestamp before the outer
    ///   join. Rows outside `(start, end]` are dropped when `verify_window`
    ///   is on. Gaps are forward-filled up to `fill_limit` rows, then the
    ///   table is optionally resampled.
    /// - If no rows remain, the report carries an empty table and a `NoData`
    ///   warning.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no points or no window were given, or when
    /// the sampling rate is zero.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tagpull::merge",
            skip(self),
            fields(points = self.points.len(), historian = self.tagpull.historian.name()),
        )
    )]
    pub async fn run(self) -> Result<MergeReport, TagpullError> {
        if self.points.is_empty() {
            return Err(TagpullError::InvalidArg(
                "no points specified for merge".into(),
            ));
        }
        let Some(window) = self.window else {
            return Err(TagpullError::InvalidArg(
                "no window specified for merge".into(),
            ));
        };
        if let Some(p) = self.sampling_rate
            && !p.is_positive()
        {
            return Err(TagpullError::InvalidArg(
                "sampling_rate must be positive".into(),
            ));
        }

        let tagpull = self.tagpull;
        let source = self.label_source;
        let reports: Vec<SeriesReport> = stream::iter(self.points)
            .map(|(point, label)| async move {
                let opts = RetrievalOptions {
                    label,
                    label_source: Some(source),
                    ..RetrievalOptions::default()
                };
                tagpull
                    .series_with(&point, window, AggregationMode::Raw, None, &opts)
                    .await
            })
            .buffered(tagpull.cfg.max_concurrent_points.max(1))
            .collect()
            .await;

        let mut warnings: Vec<TagpullError> = Vec::new();
        let mut series: Vec<Series> = Vec::with_capacity(reports.len());
        for report in reports {
            warnings.extend(report.warnings);
            if !report.series.is_empty() {
                series.push(report.series);
            }
        }

        if series.is_empty() {
            warnings.push(TagpullError::NoData);
            return Ok(MergeReport {
                table: MergedTable::default(),
                warnings,
            });
        }

        let labels = disambiguate_labels(series.iter().map(|s| s.label.clone()).collect());
        let series: Vec<Series> = series
            .into_iter()
            .zip(labels)
            .map(|(s, label)| Series {
                label,
                samples: dedup_first(s.samples),
                ..s
            })
            .collect();

        let mut table = outer_join(&series);
        if self.verify_window {
            table = clip_window(table, &window);
        }
        forward_fill(&mut table, self.fill_limit);
        if let Some(period) = self.sampling_rate {
            table = resample(table, period, self.fill_limit)?;
        }

        if table.is_empty() {
            warnings.push(TagpullError::NoData);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = table.len(),
            columns = table.columns.len(),
            warnings = warnings.len(),
            "merge complete"
        );

        Ok(MergeReport { table, warnings })
    }
}

impl Tagpull {
    /// Start a multi-point merge.
    ///
    /// ```rust,ignore
    /// let report = client
    ///     .merge()
    ///     .points(&[load, egt])
    ///     .window(TimeWindow::new(start, end))
    ///     .sampling_rate(Period::from_secs(2))
    ///     .run()
    ///     .await?;
    /// ```
    #[must_use]
    pub fn merge(&self) -> MergeBuilder<'_> {
        MergeBuilder::new(self)
    }
}
