use tagpull::{AggregationMode, LabelSource, RetrievalOptions};

use crate::helpers::{builder, client, mock, pid, points, window};

#[tokio::test]
async fn description_labels_are_disambiguated_in_request_order() {
    let (_, h) = mock();
    let report = client(&h)
        .merge()
        .points(&[
            pid(points::ADE1CA02),
            pid(points::ADE1CA12),
            pid(points::ADE1CA04),
        ])
        .window(window())
        .label_source(LabelSource::Description)
        .run()
        .await
        .unwrap();
    assert_eq!(
        report.table.labels(),
        vec!["ADE1 Percent Load", "ADE1 Percent Load2", "ADE1 Exhaust Flow"]
    );
    assert_eq!(
        report.table.columns[1].status_label(),
        "ADE1 Percent Load2 Status"
    );
}

#[tokio::test]
async fn reversed_request_swaps_the_suffix() {
    let (_, h) = mock();
    let report = client(&h)
        .merge()
        .points(&[pid(points::ADE1CA12), pid(points::ADE1CA02)])
        .window(window())
        .label_source(LabelSource::Description)
        .run()
        .await
        .unwrap();
    let ca02 = report.table.column_for(&pid(points::ADE1CA02)).unwrap();
    assert_eq!(ca02.label, "ADE1 Percent Load2");
}

#[tokio::test]
async fn explicit_labels_skip_colliding_suffixes() {
    let (_, h) = mock();
    let report = client(&h)
        .merge()
        .labeled_point(pid(points::ADE1CA02), "X")
        .labeled_point(pid(points::ADE1CA03), "X")
        .labeled_point(pid(points::ADE1CA04), "X2")
        .window(window())
        .run()
        .await
        .unwrap();
    assert_eq!(report.table.labels(), vec!["X", "X3", "X2"]);
}

#[tokio::test]
async fn description_falls_back_to_listing_then_point_id() {
    let (m, h) = mock();
    let c = client(&h);
    assert_eq!(
        c.label_for(&pid(points::ADE1CA04), LabelSource::Description).await,
        "ADE1 Exhaust Flow"
    );
    assert_eq!(m.stats().list_points_calls, 1);
    assert_eq!(
        c.label_for(&pid(points::MISSING), LabelSource::Description).await,
        points::MISSING
    );
    assert_eq!(
        c.label_for(&pid(points::ADE1CA02), LabelSource::PointId).await,
        points::ADE1CA02
    );
}

#[tokio::test]
async fn series_label_source_comes_from_config_or_options() {
    let (_, h) = mock();
    let c = builder(&h)
        .label_source(LabelSource::Description)
        .build()
        .unwrap();
    let report = c
        .series(&pid(points::ADE1CA03), window(), AggregationMode::Raw, None)
        .await;
    assert_eq!(report.series.label, "ADE1 Max EGT");

    let opts = RetrievalOptions::default().with_label_source(LabelSource::PointId);
    let report = c
        .series_with(&pid(points::ADE1CA03), window(), AggregationMode::Raw, None, &opts)
        .await;
    assert_eq!(report.series.label, points::ADE1CA03);
}
