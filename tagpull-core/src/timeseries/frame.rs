use polars::prelude::{
    Column as PlColumn, DataFrame, DataType, NamedFrom, PolarsResult, Series as PlSeries, TimeUnit,
};
use tagpull_types::{MergedTable, PointStatus};

/// Conversion of tagpull tables into `polars` data frames.
pub trait ToDataFrame {
    /// Build a data frame with a `ts` datetime column (UTC, milliseconds)
    /// followed by a value and a status column per point.
    ///
    /// # Errors
    /// Propagates `polars` construction errors, e.g. duplicate column names.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

fn status_text(status: &PointStatus) -> Option<String> {
    status
        .text
        .clone()
        .or_else(|| status.code.map(|c| c.to_string()))
}

impl ToDataFrame for MergedTable {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let millis: Vec<i64> = self.index.iter().map(|ts| ts.timestamp_millis()).collect();
        let ts = PlSeries::new("ts".into(), millis)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

        let mut columns: Vec<PlColumn> = Vec::with_capacity(1 + 2 * self.columns.len());
        columns.push(ts.into());
        for col in &self.columns {
            let values: Vec<Option<f64>> = col.values();
            let statuses: Vec<Option<String>> = col
                .cells
                .iter()
                .map(|c| c.as_ref().and_then(|c| status_text(&c.status)))
                .collect();
            columns.push(PlSeries::new(col.label.as_str().into(), values).into());
            columns.push(PlSeries::new(col.status_label().into(), statuses).into());
        }
        DataFrame::new(columns)
    }
}
