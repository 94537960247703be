use tagpull::{Period, TimeWindow};
use tagpull_mock::PointBehavior;

use crate::helpers::{at, client, epoch_record, mock, offsets, pid, points, window};

#[tokio::test]
async fn forward_fill_is_bounded_by_fill_limit() {
    let (m, h) = mock();
    m.set_behavior(
        points::ADE1CA04,
        PointBehavior::Records(vec![epoch_record(6, 1.0)]),
    );
    let c = client(&h);
    let merged = |limit: usize| {
        c.merge()
            .points(&[pid(points::ADE1CA02), pid(points::ADE1CA04)])
            .window(window())
            .fill_limit(limit)
            .run()
    };

    let report = merged(2).await.unwrap();
    let t = &report.table;
    assert_eq!(offsets(&t.index), vec![5, 6, 10, 15, 20, 25]);
    assert_eq!(
        t.columns[1].values(),
        vec![None, Some(1.0), Some(1.0), Some(1.0), None, None]
    );
    assert_eq!(
        t.columns[0].values(),
        vec![Some(74.3), Some(74.3), Some(71.3), Some(70.7), Some(72.2), Some(72.2)]
    );

    let report = merged(0).await.unwrap();
    assert_eq!(
        report.table.columns[1].values(),
        vec![None, Some(1.0), None, None, None, None]
    );
}

#[tokio::test]
async fn filled_cells_carry_their_status() {
    let (_, h) = mock();
    let report = client(&h)
        .merge()
        .points(&[pid(points::ADE1CA12), pid(points::ADE1CA02)])
        .window(window())
        .run()
        .await
        .unwrap();
    let col = &report.table.columns[0];
    // ADE1CA12 reads MANUAL at +15 and is carried forward to +20 and +25.
    let statuses: Vec<Option<&str>> = col
        .cells
        .iter()
        .map(|c| c.as_ref().and_then(|c| c.status.text.as_deref()))
        .collect();
    assert_eq!(
        statuses,
        vec![Some("OK"), Some("OK"), Some("MANUAL"), Some("MANUAL"), Some("MANUAL")]
    );
}

#[tokio::test]
async fn resample_upsamples_onto_grid() {
    let (m, h) = mock();
    m.set_behavior(
        points::ADE1CA02,
        PointBehavior::Records(vec![
            epoch_record(0, 74.3),
            epoch_record(5, 71.3),
            epoch_record(10, 70.7),
        ]),
    );
    let c = client(&h);
    let wide = TimeWindow::new(at(-5), at(30));
    let run = |secs: u32| {
        c.merge()
            .point(pid(points::ADE1CA02))
            .window(wide)
            .sampling_rate(Period::from_secs(secs))
            .run()
    };

    let two = run(2).await.unwrap();
    assert_eq!(offsets(&two.table.index), vec![0, 2, 4, 6, 8, 10]);
    assert_eq!(
        two.table.columns[0].values(),
        vec![Some(74.3), Some(74.3), Some(74.3), Some(71.3), Some(71.3), Some(70.7)]
    );

    let five = run(5).await.unwrap();
    assert_eq!(offsets(&five.table.index), vec![0, 5, 10]);
    assert_eq!(
        five.table.columns[0].values(),
        vec![Some(74.3), Some(71.3), Some(70.7)]
    );
}

#[tokio::test]
async fn resample_grid_is_regular_across_columns() {
    let (_, h) = mock();
    let report = client(&h)
        .merge()
        .points(&[pid(points::ADE1CA02), pid(points::ADE1CA04)])
        .window(window())
        .sampling_rate(Period::from_secs(4))
        .run()
        .await
        .unwrap();
    let t = &report.table;
    assert_eq!(offsets(&t.index), vec![5, 9, 13, 17, 21, 25]);
    // Bucket (9, 13] holds ADE1CA04's 3.5 at +10.
    assert_eq!(
        t.columns[1].values(),
        vec![None, None, Some(3.5), Some(3.5), Some(3.6), Some(3.6)]
    );
}

#[tokio::test]
async fn duplicate_timestamps_keep_first_sample() {
    let (m, h) = mock();
    m.set_behavior(
        points::ADE1CA02,
        PointBehavior::Records(vec![
            epoch_record(5, 1.0),
            epoch_record(5, 2.0),
            epoch_record(10, 3.0),
        ]),
    );
    let report = client(&h)
        .merge()
        .point(pid(points::ADE1CA02))
        .window(window())
        .run()
        .await
        .unwrap();
    assert_eq!(offsets(&report.table.index), vec![5, 10]);
    assert_eq!(report.table.columns[0].values(), vec![Some(1.0), Some(3.0)]);
}
