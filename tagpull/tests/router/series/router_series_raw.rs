use chrono::TimeDelta;
use tagpull::{AggregationMode, RetrievalOptions, StatusFlags, TimeFormat};

use crate::helpers::{at, builder, client, mock, offsets, pid, points, window};

#[tokio::test]
async fn raw_series_is_sorted_and_complete() {
    let (m, h) = mock();
    let report = client(&h)
        .series(&pid(points::ADE1CA02), window(), AggregationMode::Raw, None)
        .await;

    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    let s = &report.series;
    assert_eq!(s.label, points::ADE1CA02);
    let ts: Vec<_> = s.samples.iter().map(|x| x.ts).collect();
    assert_eq!(offsets(&ts), vec![5, 10, 15, 20, 25]);
    assert_eq!(s.values().collect::<Vec<_>>(), vec![74.3, 71.3, 70.7, 72.2, 72.2]);
    assert!(s.samples.iter().all(|x| x.status.is_ok()));

    let stats = m.stats();
    assert_eq!(stats.opens, 1);
    assert_eq!(stats.releases, 1);
    assert_eq!(m.operations()[0].1, "hist_raw");
}

#[tokio::test]
async fn repeated_retrieval_is_identical() {
    let (_, h) = mock();
    let c = client(&h);
    let a = c
        .series(&pid(points::ADE1CA03), window(), AggregationMode::Raw, None)
        .await;
    let b = c
        .series(&pid(points::ADE1CA03), window(), AggregationMode::Raw, None)
        .await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn status_text_becomes_flags() {
    let (_, h) = mock();
    let report = client(&h)
        .series(&pid(points::ADE1CA03), window(), AggregationMode::Raw, None)
        .await;
    let warned = &report.series.samples[2];
    assert_eq!(warned.value, 413.0);
    assert_eq!(warned.status.text.as_deref(), Some("HIGH WARN"));
    assert!(warned.status.flags.contains(StatusFlags::HIGH_WARNING));
}

#[tokio::test]
async fn high_speed_adds_milliseconds() {
    let (m, h) = mock();
    let opts = RetrievalOptions::default().high_speed(true);
    let report = client(&h)
        .series_with(&pid(points::ADE1CA02), window(), AggregationMode::Raw, None, &opts)
        .await;
    let s = &report.series.samples;
    assert_eq!(s[1].ts, at(10) + TimeDelta::milliseconds(250));
    assert_eq!(s[3].ts, at(20) + TimeDelta::milliseconds(500));
    assert_eq!(s[0].ts, at(5));
    assert_eq!(m.operations()[0].1, "hist_raw_hs");
}

#[tokio::test]
async fn utc_epoch_format_uses_utc_operation() {
    let (m, h) = mock();
    let c = builder(&h).time_format(TimeFormat::UtcEpoch).build().unwrap();
    let report = c
        .series(&pid(points::ADE1CA02), window(), AggregationMode::Raw, None)
        .await;
    assert_eq!(report.series.samples[0].ts, at(5));
    assert_eq!(m.operations()[0].1, "hist_raw_utc");
}

#[tokio::test]
async fn text_timestamps_follow_configured_zone() {
    let (_, h) = mock();
    let c = builder(&h)
        .time_zone(chrono_tz::America::Chicago)
        .build()
        .unwrap();
    let report = c
        .series(&pid(points::ADE1CA02), window(), AggregationMode::Raw, None)
        .await;
    // Service text is local Chicago time (UTC-6 in January).
    assert_eq!(report.series.samples[0].ts, at(5) + TimeDelta::hours(6));

    let utc = RetrievalOptions::default().with_time_zone(chrono_tz::UTC);
    let report = c
        .series_with(&pid(points::ADE1CA02), window(), AggregationMode::Raw, None, &utc)
        .await;
    assert_eq!(report.series.samples[0].ts, at(5));
}

#[tokio::test]
async fn explicit_label_wins() {
    let (_, h) = mock();
    let opts = RetrievalOptions::labeled("load");
    let report = client(&h)
        .series_with(&pid(points::ADE1CA02), window(), AggregationMode::Raw, None, &opts)
        .await;
    assert_eq!(report.series.label, "load");
    assert_eq!(report.series.status_label(), "load Status");
}
