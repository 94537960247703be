// Shared fixtures and constructors for router tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tagpull::{
    Historian, PointId, RawRecord, RawStatus, RawTimestamp, Tagpull, TagpullBuilder, TagpullError,
    TimeWindow,
};
use tagpull_mock::MockHistorian;

pub use tagpull_mock::fixtures::{BASE_EPOCH, at, points};

/// Parse a point id without unwrap noise in tests.
pub fn pid(s: &str) -> PointId {
    PointId::new(s).expect("valid point id")
}

/// The fixture window, 02:00:00 .. 02:00:30 UTC.
pub fn window() -> TimeWindow {
    TimeWindow::new(at(0), at(30))
}

/// Fresh mock plus the same mock as a trait object.
pub fn mock() -> (Arc<MockHistorian>, Arc<dyn Historian>) {
    let m = Arc::new(MockHistorian::new());
    let h: Arc<dyn Historian> = m.clone();
    (m, h)
}

/// Builder pre-wired to `h`.
pub fn builder(h: &Arc<dyn Historian>) -> TagpullBuilder {
    Tagpull::builder().with_historian(Arc::clone(h))
}

/// Client with default configuration.
pub fn client(h: &Arc<dyn Historian>) -> Tagpull {
    builder(h).build().expect("client")
}

/// Raw epoch record with an OK status.
pub fn epoch_record(secs: i64, value: f64) -> RawRecord {
    RawRecord {
        timestamp: RawTimestamp::Epoch(BASE_EPOCH + secs),
        msec: None,
        value,
        status: RawStatus::Text("OK".into()),
    }
}

/// Seconds after the fixture anchor for each index row.
pub fn offsets(index: &[DateTime<Utc>]) -> Vec<i64> {
    index.iter().map(|t| t.timestamp() - BASE_EPOCH).collect()
}

pub fn has_warning(warnings: &[TagpullError], pred: impl Fn(&TagpullError) -> bool) -> bool {
    warnings.iter().any(pred)
}
