//! Static fixture data served by `MockHistorian`.
//!
//! All samples sit inside 2017-01-09 02:00:00 .. 02:00:30 UTC.

pub mod points;
pub mod services;

use chrono::{DateTime, Utc};

/// 2017-01-09 02:00:00 UTC, the anchor of every fixture sample.
pub const BASE_EPOCH: i64 = 1_483_927_200;

/// Anchor timestamp of the fixtures.
#[must_use]
pub fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(BASE_EPOCH, 0).unwrap_or_default()
}

/// `base_time() + secs`.
#[must_use]
pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(BASE_EPOCH + secs, 0).unwrap_or_default()
}
