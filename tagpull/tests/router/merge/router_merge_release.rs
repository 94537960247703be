use std::time::Duration;

use tagpull::StatusCode;
use tagpull_mock::PointBehavior;

use crate::helpers::{client, mock, pid, points, window};

#[tokio::test]
async fn every_cursor_is_released_despite_mid_drain_failure() {
    let (m, h) = mock();
    m.set_behavior(
        points::ADE1CA02,
        PointBehavior::FailAfter {
            records: 2,
            code: StatusCode(-7),
        },
    );
    m.set_behavior(
        points::ADE1CA04,
        PointBehavior::FailOpenWithHandle(StatusCode(-3)),
    );
    let report = client(&h)
        .merge()
        .points(&[
            pid(points::ADE1CA02),
            pid(points::ADE1CA03),
            pid(points::ADE1CA04),
        ])
        .window(window())
        .run()
        .await
        .unwrap();

    let stats = m.stats();
    assert_eq!(stats.opens, 3);
    assert_eq!(stats.handles_issued, 3);
    assert_eq!(stats.releases, 3);
    assert_eq!(stats.stray_releases, 0);
    assert_eq!(stats.open_now, 0);

    let load = report.table.column_for(&pid(points::ADE1CA02)).unwrap();
    assert_eq!(load.values()[..2], [Some(74.3), Some(71.3)]);
    assert_eq!(report.table.columns.len(), 2);
}

#[tokio::test]
async fn dropping_a_stalled_merge_releases_open_cursors() {
    let (m, h) = mock();
    m.set_behavior(points::ADE1CA03, PointBehavior::Hang);
    let c = client(&h);
    let merge = c
        .merge()
        .points(&[pid(points::ADE1CA02), pid(points::ADE1CA03)])
        .window(window())
        .run();

    let res = tokio::time::timeout(Duration::from_millis(50), merge).await;
    assert!(res.is_err(), "merge should stall on the hanging point");

    let stats = m.stats();
    assert_eq!(stats.open_now, 0);
    assert_eq!(stats.releases, stats.handles_issued);
}
