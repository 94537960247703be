use crate::Tagpull;
use tagpull_core::{
    AggregationMode, Cursor, Period, PointId, QueryPlan, RetrievalOptions, Series, SeriesReport,
    TagpullError, TimeWindow, drain, normalize_record, sort_samples,
};

fn empty_report(point: &PointId, label: Option<&str>, warning: TagpullError) -> SeriesReport {
    let mut series = Series::empty(point.clone());
    if let Some(l) = label {
        series.label = l.to_string();
    }
    SeriesReport {
        series,
        warnings: vec![warning],
    }
}

impl Tagpull {
    /// Retrieve one point's time series with the client's default options.
    ///
    /// See [`Tagpull::series_with`].
    pub async fn series(
        &self,
        point: &PointId,
        window: TimeWindow,
        mode: AggregationMode,
        period: Option<Period>,
    ) -> SeriesReport {
        self.series_with(point, window, mode, period, &RetrievalOptions::default())
            .await
    }

    /// Retrieve one point's time series.
    ///
    /// Behavior:
    /// - Invalid input (misordered window, aggregate without a positive
    ///   period) yields an empty series with an `InvalidArg` warning and no
    ///   remote call.
    /// - Unknown points yield an empty series with a `NotFound` warning.
    /// - Open failures yield an empty series with a `Remote` warning; the
    ///   cursor is always released.
    /// - Records with unparsable timestamps are skipped and reported once as
    ///   a `Data` warning.
    /// - An existing point without samples yields an `EmptyResult` warning.
    ///
    /// Samples come back sorted by timestamp. The call never fails as a whole.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tagpull::series",
            skip(self, opts),
            fields(point = %point, mode = %mode, historian = self.historian.name()),
        )
    )]
    pub async fn series_with(
        &self,
        point: &PointId,
        window: TimeWindow,
        mode: AggregationMode,
        period: Option<Period>,
        opts: &RetrievalOptions,
    ) -> SeriesReport {
        let explicit = opts.label.as_deref();
        if !window.is_ordered() {
            return empty_report(
                point,
                explicit,
                TagpullError::InvalidArg(format!(
                    "window start {} is after end {}",
                    window.start, window.end
                )),
            );
        }
        let format = opts.time_format.unwrap_or(self.cfg.time_format);
        let plan = match QueryPlan::select(mode, period, opts.high_speed, format) {
            Ok(plan) => plan,
            Err(e) => return empty_report(point, explicit, e),
        };

        if !self.historian.exists(point).await {
            #[cfg(feature = "tracing")]
            tracing::warn!(point = %point, "point not found");
            return empty_report(point, explicit, TagpullError::not_found(format!("point {point}")));
        }

        let cursor = match Cursor::open(&self.historian, point, &window, &plan).await {
            Ok(c) => c,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(point = %point, error = %e, "query open failed");
                return empty_report(point, explicit, e);
            }
        };
        let records = drain(cursor).await;

        let tz = opts.time_zone.unwrap_or(self.cfg.time_zone);
        let mut warnings: Vec<TagpullError> = Vec::new();
        let mut samples = Vec::with_capacity(records.len());
        let mut skipped = 0usize;
        let mut first_err: Option<TagpullError> = None;
        for rec in &records {
            match normalize_record(rec, tz, plan.is_high_speed()) {
                Ok(s) => samples.push(s),
                Err(e) => {
                    skipped += 1;
                    first_err.get_or_insert(e);
                }
            }
        }
        if let Some(e) = first_err {
            #[cfg(feature = "tracing")]
            tracing::warn!(point = %point, skipped, "skipped unparsable records");
            warnings.push(TagpullError::Data(format!(
                "{point}: skipped {skipped} record(s); first: {e}"
            )));
        }
        sort_samples(&mut samples);

        if samples.is_empty() {
            warnings.push(TagpullError::empty(format!(
                "point {point} in window {} .. {}",
                window.start, window.end
            )));
        }

        let source = opts.label_source.unwrap_or(self.cfg.label_source);
        let label = self.resolve_label(point, explicit, source).await;

        #[cfg(feature = "tracing")]
        tracing::debug!(point = %point, samples = samples.len(), "series retrieved");

        SeriesReport {
            series: Series {
                point: point.clone(),
                label,
                samples,
            },
            warnings,
        }
    }
}
