//! Server-side behavior of the mock: window filtering, aggregation and
//! timestamp encoding, so retrieval code sees realistic records.

use chrono::{DateTime, TimeDelta, Utc};
use tagpull_core::{HistOp, QueryPlan, RawRecord, RawStatus, RawTimestamp, TimeFormat, TimeWindow};

use crate::fixtures::BASE_EPOCH;
use crate::fixtures::points::FixtureSample;

#[derive(Debug, Clone)]
struct Obs {
    ts: DateTime<Utc>,
    msec: u16,
    value: f64,
    status: &'static str,
}

fn encode(
    ts: DateTime<Utc>,
    msec: Option<u16>,
    value: f64,
    status: &str,
    plan: &QueryPlan,
) -> RawRecord {
    let timestamp = match plan.time_format() {
        TimeFormat::UtcEpoch => RawTimestamp::Epoch(ts.timestamp()),
        _ => RawTimestamp::Text(ts.format("%m/%d/%y %H:%M:%S").to_string()),
    };
    RawRecord {
        timestamp,
        msec: if plan.is_high_speed() { msec } else { None },
        value,
        status: RawStatus::Text(format!("{status:<16}")),
    }
}

fn boundaries(window: &TimeWindow, step: TimeDelta) -> Vec<DateTime<Utc>> {
    let mut out = Vec::new();
    let mut g = window.start;
    while g <= window.end {
        out.push(g);
        g += step;
    }
    out
}

/// Records the mock service answers for `plan` over `window`.
pub fn records_for(
    samples: &[FixtureSample],
    window: &TimeWindow,
    plan: &QueryPlan,
) -> Vec<RawRecord> {
    let obs: Vec<Obs> = samples
        .iter()
        .filter_map(|(off, msec, value, status)| {
            DateTime::from_timestamp(BASE_EPOCH + off, 0).map(|ts| Obs {
                ts,
                msec: *msec,
                value: *value,
                status: *status,
            })
        })
        .collect();

    let Some(period) = plan.period() else {
        return obs
            .iter()
            .filter(|o| o.ts >= window.start && o.ts <= window.end)
            .map(|o| encode(o.ts, Some(o.msec), o.value, o.status, plan))
            .collect();
    };

    let step = TimeDelta::seconds(i64::from(period.as_secs()));
    let mut out = Vec::new();
    for g in boundaries(window, step) {
        let bucket: Vec<&Obs> = obs.iter().filter(|o| o.ts >= g && o.ts < g + step).collect();
        let prev = obs.iter().rev().find(|o| o.ts <= g);
        let next = obs.iter().find(|o| o.ts >= g);
        let value = match plan.op() {
            HistOp::Average if !bucket.is_empty() => {
                Some(bucket.iter().map(|o| o.value).sum::<f64>() / bucket.len() as f64)
            }
            HistOp::Minimum => bucket.iter().map(|o| o.value).reduce(f64::min),
            HistOp::Maximum => bucket.iter().map(|o| o.value).reduce(f64::max),
            HistOp::Snapshot => prev.map(|o| o.value),
            HistOp::Interpolated => match (prev, next) {
                (Some(p), Some(n)) if n.ts > p.ts => {
                    let span = (n.ts - p.ts).num_milliseconds() as f64;
                    let frac = (g - p.ts).num_milliseconds() as f64 / span;
                    Some(p.value + (n.value - p.value) * frac)
                }
                (Some(p), _) => Some(p.value),
                _ => None,
            },
            _ => None,
        };
        if let Some(v) = value {
            out.push(encode(g, None, v, "OK", plan));
        }
    }
    out
}
