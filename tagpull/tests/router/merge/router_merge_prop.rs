use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use tagpull::{Historian, StatusCode, Tagpull};
use tagpull_mock::{MockHistorian, PointBehavior};

use crate::helpers::{BASE_EPOCH, epoch_record, pid, points, window};

const IDS: [&str; 3] = [points::ADE1CA02, points::ADE1CA03, points::ADE1CA04];

#[derive(Clone, Debug)]
enum Script {
    Offsets(Vec<i64>),
    FailAfter(usize),
    Missing,
}

fn arb_script() -> impl Strategy<Value = Script> {
    prop_oneof![
        4 => proptest::collection::vec(-5i64..40, 0..12).prop_map(Script::Offsets),
        1 => (0usize..5).prop_map(Script::FailAfter),
        1 => Just(Script::Missing),
    ]
}

fn apply(mock: &MockHistorian, id: &str, script: &Script) {
    let behavior = match script {
        Script::Offsets(offs) => PointBehavior::Records(
            offs.iter()
                .enumerate()
                .map(|(i, o)| epoch_record(*o, i as f64))
                .collect(),
        ),
        Script::FailAfter(n) => PointBehavior::FailAfter {
            records: *n,
            code: StatusCode(-9),
        },
        Script::Missing => PointBehavior::Missing,
    };
    mock.set_behavior(id, behavior);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 40, .. ProptestConfig::default() })]
    #[test]
    fn merge_invariants_hold(
        scripts in proptest::collection::vec(arb_script(), 3),
        fill_limit in 0usize..4,
        rate in proptest::option::of(1u32..6),
    ) {
        tokio_test::block_on(async move {
            let mock = Arc::new(MockHistorian::new());
            for (id, script) in IDS.iter().zip(&scripts) {
                apply(&mock, id, script);
            }
            let h: Arc<dyn Historian> = mock.clone();
            let client = Tagpull::builder().with_historian(h).build().unwrap();

            let mut merge = client
                .merge()
                .points(&IDS.map(pid))
                .window(window())
                .fill_limit(fill_limit);
            if let Some(r) = rate {
                merge = merge.sampling_rate(tagpull::Period::from_secs(r));
            }
            let report = merge.run().await.unwrap();
            let t = &report.table;

            // Strictly increasing index.
            assert!(t.index.windows(2).all(|w| w[0] < w[1]));
            // Unique labels, one cell per row.
            let labels: HashSet<&str> = t.labels().into_iter().collect();
            assert_eq!(labels.len(), t.columns.len());
            assert!(t.columns.iter().all(|c| c.cells.len() == t.len()));
            // Without resampling a cell is set iff an observation sits at
            // most `fill_limit` rows above it.
            if rate.is_none() {
                for (id, script) in IDS.iter().zip(&scripts) {
                    let (Script::Offsets(offs), Some(col)) = (script, t.column(id)) else {
                        continue;
                    };
                    let observed: HashSet<i64> = offs.iter().copied().collect();
                    let mut last: Option<usize> = None;
                    for (i, ts) in t.index.iter().enumerate() {
                        if observed.contains(&(ts.timestamp() - BASE_EPOCH)) {
                            last = Some(i);
                        }
                        let expect = last.is_some_and(|j| i - j <= fill_limit);
                        assert_eq!(col.cells[i].is_some(), expect, "{id} row {i}");
                    }
                }
            }
            // Every opened cursor was released.
            let stats = mock.stats();
            assert_eq!(stats.releases, stats.handles_issued);
            assert_eq!(stats.open_now, 0);
            // Empty table always carries NoData.
            if t.is_empty() {
                assert!(report.warnings.iter().any(|w| matches!(w, tagpull::TagpullError::NoData)));
            }
        });
    }
}
