use tagpull::{
    AggregationMode, Period, RawRecord, RawStatus, RawTimestamp, RetrievalOptions, StatusCode,
    TagpullError, TimeWindow,
};
use tagpull_mock::PointBehavior;

use crate::helpers::{at, client, epoch_record, has_warning, mock, pid, points, window};

#[tokio::test]
async fn missing_point_is_empty_with_not_found() {
    let (m, h) = mock();
    let report = client(&h)
        .series(&pid(points::MISSING), window(), AggregationMode::Raw, None)
        .await;
    assert!(report.series.is_empty());
    assert_eq!(report.series.label, points::MISSING);
    assert!(matches!(report.warnings[..], [TagpullError::NotFound { .. }]));
    assert!(!report.has_actionable_warnings());
    assert_eq!(m.stats().opens, 0);
}

#[tokio::test]
async fn misordered_window_makes_no_remote_call() {
    let (m, h) = mock();
    let backwards = TimeWindow::new(at(30), at(0));
    let report = client(&h)
        .series(&pid(points::ADE1CA02), backwards, AggregationMode::Raw, None)
        .await;
    assert!(report.series.is_empty());
    assert!(matches!(report.warnings[..], [TagpullError::InvalidArg(_)]));
    let stats = m.stats();
    assert_eq!(stats.exists_calls, 0);
    assert_eq!(stats.opens, 0);
}

#[tokio::test]
async fn aggregate_needs_positive_period() {
    let (m, h) = mock();
    let c = client(&h);
    for period in [None, Some(Period::from_secs(0))] {
        let report = c
            .series(&pid(points::ADE1CA02), window(), AggregationMode::Average, period)
            .await;
        assert!(report.series.is_empty());
        assert!(matches!(report.warnings[..], [TagpullError::InvalidArg(_)]));
    }
    assert_eq!(m.stats().opens, 0);
}

#[tokio::test]
async fn empty_window_reports_empty_result() {
    let (m, h) = mock();
    let opts = RetrievalOptions::labeled("spare");
    let report = client(&h)
        .series_with(&pid(points::ADE1CA09), window(), AggregationMode::Raw, None, &opts)
        .await;
    assert!(report.series.is_empty());
    assert_eq!(report.series.label, "spare");
    assert!(matches!(report.warnings[..], [TagpullError::EmptyResult { .. }]));
    assert_eq!(m.stats().releases, 1);
}

#[tokio::test]
async fn failed_open_reports_remote_code() {
    let (m, h) = mock();
    m.set_behavior(points::ADE1CA02, PointBehavior::FailOpen(StatusCode(-5)));
    let report = client(&h)
        .series(&pid(points::ADE1CA02), window(), AggregationMode::Raw, None)
        .await;
    assert!(report.series.is_empty());
    assert_eq!(report.warnings, vec![TagpullError::remote("hist_raw", -5)]);
    assert!(report.has_actionable_warnings());
}

#[tokio::test]
async fn failed_open_with_handle_still_releases() {
    let (m, h) = mock();
    m.set_behavior(
        points::ADE1CA02,
        PointBehavior::FailOpenWithHandle(StatusCode(-6)),
    );
    let report = client(&h)
        .series(&pid(points::ADE1CA02), window(), AggregationMode::Raw, None)
        .await;
    assert!(report.series.is_empty());
    let stats = m.stats();
    assert_eq!(stats.handles_issued, 1);
    assert_eq!(stats.releases, 1);
    assert_eq!(stats.next_calls, 0);
    assert_eq!(stats.open_now, 0);
}

#[tokio::test]
async fn unparsable_records_are_skipped_with_one_warning() {
    let (m, h) = mock();
    let garbled = |text: &str| RawRecord {
        timestamp: RawTimestamp::Text(text.into()),
        msec: None,
        value: 0.0,
        status: RawStatus::Code(0),
    };
    m.set_behavior(
        points::ADE1CA02,
        PointBehavior::Records(vec![
            epoch_record(12, 2.0),
            garbled("not a time"),
            epoch_record(6, 1.0),
            garbled("13/45/17 99:00:00"),
        ]),
    );
    let report = client(&h)
        .series(&pid(points::ADE1CA02), window(), AggregationMode::Raw, None)
        .await;

    assert_eq!(report.series.values().collect::<Vec<_>>(), vec![1.0, 2.0]);
    assert_eq!(report.warnings.len(), 1);
    match &report.warnings[0] {
        TagpullError::Data(msg) => assert!(msg.contains("skipped 2"), "{msg}"),
        other => panic!("unexpected warning {other:?}"),
    }
}

#[tokio::test]
async fn mid_stream_failure_keeps_accepted_records() {
    let (m, h) = mock();
    m.set_behavior(
        points::ADE1CA02,
        PointBehavior::FailAfter {
            records: 3,
            code: StatusCode(-7),
        },
    );
    let report = client(&h)
        .series(&pid(points::ADE1CA02), window(), AggregationMode::Raw, None)
        .await;
    assert_eq!(report.series.len(), 3);
    assert!(report.warnings.is_empty());
    assert!(!has_warning(&report.warnings, |w| matches!(w, TagpullError::Remote { .. })));
    assert_eq!(m.stats().releases, 1);
}
