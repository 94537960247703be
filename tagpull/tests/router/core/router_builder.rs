use std::sync::Arc;

use tagpull::{
    Historian, LabelSource, Period, Tagpull, TagpullConfig, TagpullError, TimeFormat,
};
use tagpull_mock::MockHistorian;

use crate::helpers::{builder, mock, pid, points, window};

#[test]
fn build_requires_a_historian() {
    let err = Tagpull::builder().build().unwrap_err();
    assert!(matches!(err, TagpullError::InvalidArg(m) if m.contains("historian")));
}

#[test]
fn build_rejects_zero_concurrency_and_zero_rate() {
    let (_, h) = mock();
    assert!(matches!(
        builder(&h).max_concurrent_points(0).build(),
        Err(TagpullError::InvalidArg(_))
    ));
    assert!(matches!(
        builder(&h).sampling_rate(Period::from_secs(0)).build(),
        Err(TagpullError::InvalidArg(_))
    ));
}

#[test]
fn modifiers_land_in_config() {
    let (_, h) = mock();
    let client = builder(&h)
        .fill_limit(12)
        .sampling_rate(Period::from_secs(2))
        .verify_window(false)
        .label_source(LabelSource::Description)
        .max_concurrent_points(2)
        .time_zone(chrono_tz::America::Chicago)
        .time_format(TimeFormat::UtcEpoch)
        .build()
        .unwrap();
    let cfg = client.config();
    assert_eq!(cfg.fill_limit, 12);
    assert_eq!(cfg.sampling_rate, Some(Period::from_secs(2)));
    assert!(!cfg.verify_window);
    assert_eq!(cfg.label_source, LabelSource::Description);
    assert_eq!(cfg.max_concurrent_points, 2);
    assert_eq!(cfg.time_zone, chrono_tz::America::Chicago);
    assert_eq!(cfg.time_format, TimeFormat::UtcEpoch);

    let defaults = builder(&h).config(TagpullConfig::default()).build().unwrap();
    assert_eq!(defaults.config().fill_limit, 600);
}

#[tokio::test]
async fn with_historian_swaps_backend_and_keeps_config() {
    let (old_mock, old) = mock();
    let client = builder(&old).fill_limit(7).build().unwrap();

    let new_mock = Arc::new(MockHistorian::named("replacement"));
    let new: Arc<dyn Historian> = new_mock.clone();
    let reconnected = client.with_historian(new);

    assert_eq!(reconnected.historian().name(), "replacement");
    assert_eq!(reconnected.config().fill_limit, 7);

    let report = reconnected
        .series(&pid(points::ADE1CA02), window(), tagpull::AggregationMode::Raw, None)
        .await;
    assert_eq!(report.series.len(), 5);
    assert_eq!(new_mock.stats().opens, 1);
    assert_eq!(old_mock.stats().opens, 0);

    // The original client still works against the old historian.
    let _ = client
        .series(&pid(points::ADE1CA02), window(), tagpull::AggregationMode::Raw, None)
        .await;
    assert_eq!(old_mock.stats().opens, 1);
}
