use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use tagpull_types::{Cell, Column, MergedTable, Series, TimeWindow};

/// Outer-join series on timestamp.
///
/// - The index is the sorted union of all sample timestamps.
/// - Columns follow the input order and take each series' label.
/// - Within one series the first sample at a timestamp wins.
/// - Cells with no sample at a row stay `None`.
#[must_use]
pub fn outer_join(series: &[Series]) -> MergedTable {
    let index: BTreeSet<DateTime<Utc>> = series
        .iter()
        .flat_map(|s| s.samples.iter().map(|x| x.ts))
        .collect();

    let columns = series
        .iter()
        .map(|s| {
            let mut by_ts: BTreeMap<DateTime<Utc>, Cell> = BTreeMap::new();
            for sample in &s.samples {
                by_ts.entry(sample.ts).or_insert_with(|| Cell {
                    value: sample.value,
                    status: sample.status.clone(),
                });
            }
            Column {
                point: s.point.clone(),
                label: s.label.clone(),
                cells: index.iter().map(|ts| by_ts.remove(ts)).collect(),
            }
        })
        .collect();

    MergedTable {
        index: index.into_iter().collect(),
        columns,
    }
}

/// Keep only rows with `window.start < ts <= window.end`.
#[must_use]
pub fn clip_window(table: MergedTable, window: &TimeWindow) -> MergedTable {
    let keep: Vec<bool> = table
        .index
        .iter()
        .map(|ts| window.contains_exclusive_start(*ts))
        .collect();
    if keep.iter().all(|k| *k) {
        return table;
    }

    let index = table
        .index
        .into_iter()
        .zip(&keep)
        .filter_map(|(ts, k)| k.then_some(ts))
        .collect();
    let columns = table
        .columns
        .into_iter()
        .map(|c| Column {
            cells: c
                .cells
                .into_iter()
                .zip(&keep)
                .filter_map(|(cell, k)| k.then_some(cell))
                .collect(),
            ..c
        })
        .collect();
    MergedTable { index, columns }
}
