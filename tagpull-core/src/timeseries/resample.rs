use chrono::{DateTime, TimeDelta, Utc};
use tagpull_types::{Cell, Column, MergedTable, Period, TagpullError};

use crate::timeseries::fill::forward_fill;

fn grid(first: DateTime<Utc>, last: DateTime<Utc>, step: TimeDelta) -> Vec<DateTime<Utc>> {
    let mut out = vec![first];
    let mut g = first;
    while g < last {
        g += step;
        out.push(g);
    }
    out
}

/// Resample a merged table onto a regular grid anchored at its first row.
///
/// - Grid points are `first + k * period`, extended to the first grid point
///   at or after the last row.
/// - The first grid point takes the first row.
/// - Every later grid point `g` takes, per column, the last populated cell
///   among rows in the right-closed bucket `(g - period, g]`.
/// - Empty buckets are then forward-filled with at most `fill_limit`
///   consecutive cells.
///
/// # Errors
/// Returns `TagpullError::InvalidArg` for a zero period.
pub fn resample(
    table: MergedTable,
    period: Period,
    fill_limit: usize,
) -> Result<MergedTable, TagpullError> {
    if !period.is_positive() {
        return Err(TagpullError::InvalidArg(
            "resample period must be positive".into(),
        ));
    }
    let (Some(&first), Some(&last)) = (table.index.first(), table.index.last()) else {
        return Ok(table);
    };
    let step = TimeDelta::from_std(period.to_duration())
        .map_err(|e| TagpullError::InvalidArg(format!("resample period out of range: {e}")))?;
    let index = grid(first, last, step);

    let columns = table
        .columns
        .into_iter()
        .map(|column| {
            let mut cells: Vec<Option<Cell>> = Vec::with_capacity(index.len());
            let mut rows = table.index.iter().zip(column.cells);
            let mut pending = rows.next();
            for (k, g) in index.iter().enumerate() {
                let mut picked: Option<Cell> = None;
                while let Some((ts, cell)) = pending.take() {
                    if *ts > *g {
                        pending = Some((ts, cell));
                        break;
                    }
                    if cell.is_some() {
                        picked = cell;
                    }
                    pending = rows.next();
                    if k == 0 {
                        break;
                    }
                }
                cells.push(picked);
            }
            Column { cells, ..column }
        })
        .collect();

    let mut out = MergedTable { index, columns };
    forward_fill(&mut out, fill_limit);
    Ok(out)
}
