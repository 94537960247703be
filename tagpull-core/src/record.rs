use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::historian::{RawRecord, RawStatus, RawTimestamp};
use tagpull_types::{PointStatus, Sample, TagpullError};

/// Text layouts the historian is known to emit, most specific first.
///
/// Two-digit years must be tried before `%Y`, which would otherwise accept
/// `17` as year 17.
const TEXT_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a service text timestamp interpreted in `tz`.
///
/// Accepts the layouts in `TEXT_FORMATS` plus RFC 3339 (which carries its
/// own offset and ignores `tz`). Ambiguous local times resolve to the
/// earlier instant.
///
/// # Errors
/// Returns `TagpullError::Data` when no layout matches or the local time
/// does not exist in `tz`.
pub fn parse_text_timestamp(text: &str, tz: Tz) -> Result<DateTime<Utc>, TagpullError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in TEXT_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| {
                    TagpullError::Data(format!("timestamp '{text}' does not exist in {tz}"))
                });
        }
    }
    Err(TagpullError::Data(format!("unparsable timestamp '{text}'")))
}

fn resolve_timestamp(raw: &RawTimestamp, tz: Tz) -> Result<DateTime<Utc>, TagpullError> {
    match raw {
        RawTimestamp::Epoch(secs) => DateTime::from_timestamp(*secs, 0)
            .ok_or_else(|| TagpullError::Data(format!("epoch {secs} out of range"))),
        RawTimestamp::Text(text) => parse_text_timestamp(text, tz),
    }
}

/// Convert one raw record into a [`Sample`].
///
/// In high-speed mode the record's millisecond component is added to the
/// second-resolution timestamp; otherwise it is ignored.
///
/// # Errors
/// Returns `TagpullError::Data` when the timestamp cannot be resolved or the
/// millisecond component is out of range.
pub fn normalize_record(
    record: &RawRecord,
    tz: Tz,
    high_speed: bool,
) -> Result<Sample, TagpullError> {
    let mut ts = resolve_timestamp(&record.timestamp, tz)?;
    if high_speed && let Some(ms) = record.msec {
        if ms > 999 {
            return Err(TagpullError::Data(format!("millisecond component {ms} out of range")));
        }
        ts += Duration::milliseconds(i64::from(ms));
    }
    let status = match &record.status {
        RawStatus::Code(code) => PointStatus::from_code(*code),
        RawStatus::Text(text) => PointStatus::from_text(text),
    };
    Ok(Sample {
        ts,
        value: record.value,
        status,
    })
}
