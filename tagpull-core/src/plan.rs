use serde::{Deserialize, Serialize};

use tagpull_types::{AggregationMode, Period, TagpullError, TimeFormat};

/// Remote history operation families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistOp {
    /// Unaggregated samples.
    Raw,
    /// Unaggregated samples with millisecond resolution.
    RawHighSpeed,
    /// Period average.
    Average,
    /// Period interpolation.
    Interpolated,
    /// Period minimum.
    Minimum,
    /// Period maximum.
    Maximum,
    /// Period snapshot.
    Snapshot,
}

/// A validated remote request shape: operation, period and time encoding.
///
/// Raw plans never carry a period; aggregating plans always carry a
/// strictly positive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryPlan {
    op: HistOp,
    period: Option<Period>,
    time_format: TimeFormat,
}

impl QueryPlan {
    /// Map a mode and period to a remote operation.
    ///
    /// Raw ignores any supplied period. `high_speed` only affects raw
    /// requests; aggregated operations have no millisecond variant.
    ///
    /// # Errors
    /// Returns `TagpullError::InvalidArg` when an aggregating mode has no
    /// period or a zero period.
    pub fn select(
        mode: AggregationMode,
        period: Option<Period>,
        high_speed: bool,
        time_format: TimeFormat,
    ) -> Result<Self, TagpullError> {
        let op = match mode {
            AggregationMode::Raw if high_speed => HistOp::RawHighSpeed,
            AggregationMode::Raw => HistOp::Raw,
            AggregationMode::Average => HistOp::Average,
            AggregationMode::Interpolated => HistOp::Interpolated,
            AggregationMode::Minimum => HistOp::Minimum,
            AggregationMode::Maximum => HistOp::Maximum,
            AggregationMode::Snapshot => HistOp::Snapshot,
        };
        if !mode.requires_period() {
            return Ok(Self {
                op,
                period: None,
                time_format,
            });
        }
        match period {
            Some(p) if p.is_positive() => Ok(Self {
                op,
                period: Some(p),
                time_format,
            }),
            Some(_) => Err(TagpullError::InvalidArg(format!(
                "{mode} requires a positive period"
            ))),
            None => Err(TagpullError::InvalidArg(format!("{mode} requires a period"))),
        }
    }

    /// Remote operation family.
    #[must_use]
    pub const fn op(&self) -> HistOp {
        self.op
    }

    /// Aggregation period, absent for raw plans.
    #[must_use]
    pub const fn period(&self) -> Option<Period> {
        self.period
    }

    /// Requested timestamp encoding.
    #[must_use]
    pub const fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    /// True when records carry a millisecond component.
    #[must_use]
    pub const fn is_high_speed(&self) -> bool {
        matches!(self.op, HistOp::RawHighSpeed)
    }

    /// Stable remote operation name for logs and errors.
    #[must_use]
    pub const fn operation_name(&self) -> &'static str {
        let utc = matches!(self.time_format, TimeFormat::UtcEpoch);
        match (self.op, utc) {
            (HistOp::Raw, false) => "hist_raw",
            (HistOp::Raw, true) => "hist_raw_utc",
            (HistOp::RawHighSpeed, false) => "hist_raw_hs",
            (HistOp::RawHighSpeed, true) => "hist_raw_hs_utc",
            (HistOp::Average, false) => "hist_avg",
            (HistOp::Average, true) => "hist_avg_utc",
            (HistOp::Interpolated, false) => "hist_interp",
            (HistOp::Interpolated, true) => "hist_interp_utc",
            (HistOp::Minimum, false) => "hist_min",
            (HistOp::Minimum, true) => "hist_min_utc",
            (HistOp::Maximum, false) => "hist_max",
            (HistOp::Maximum, true) => "hist_max_utc",
            (HistOp::Snapshot, false) => "hist_snap",
            (HistOp::Snapshot, true) => "hist_snap_utc",
        }
    }
}
