use std::sync::Arc;

use tagpull::{CacheConfig, Historian, HistorianBuilder, ServiceId, Tagpull};
use tagpull_mock::MockHistorian;

use crate::helpers::{client, mock, pid, points};

#[tokio::test]
async fn services_and_points_are_listed() {
    let (_, h) = mock();
    let c = client(&h);
    let services = c.services().await.unwrap();
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    assert!(names.contains(&"MDSSCSC1.ANVCALC"));
    assert!(names.contains(&"MDSSCSC1.ANVHIST"));

    let calc = c
        .points(&ServiceId::new("MDSSCSC1.ANVCALC").unwrap())
        .await
        .unwrap();
    assert_eq!(calc.len(), 5);
    let load = calc
        .iter()
        .find(|p| p.point == pid(points::ADE1CA02))
        .unwrap();
    assert_eq!(load.units, "Load");
    assert_eq!(load.value, Some(72.2));

    let hist = c
        .points(&ServiceId::new("MDSSCSC1.ANVHIST").unwrap())
        .await
        .unwrap();
    assert!(hist.is_empty());
}

#[tokio::test]
async fn exists_and_describe() {
    let (_, h) = mock();
    let c = client(&h);
    assert!(c.exists(&pid(points::ADE1CA09)).await);
    assert!(!c.exists(&pid(points::MISSING)).await);
    assert_eq!(
        c.describe(&pid(points::ADE1CA03)).await.as_deref(),
        Some("ADE1 Max EGT")
    );
    assert_eq!(
        c.describe(&pid(points::ADE1CA04)).await.as_deref(),
        Some("ADE1 Exhaust Flow")
    );
    assert_eq!(c.describe(&pid(points::MISSING)).await, None);
}

#[tokio::test]
async fn cached_historian_answers_repeat_lookups() {
    let m = Arc::new(MockHistorian::new());
    let raw: Arc<dyn Historian> = m.clone();
    let layered = HistorianBuilder::new(raw)
        .with_cache(&CacheConfig::default())
        .build()
        .unwrap();
    let c = Tagpull::builder().with_historian(layered).build().unwrap();

    for _ in 0..3 {
        let _ = c.describe(&pid(points::ADE1CA04)).await;
        let _ = c.exists(&pid(points::ADE1CA02)).await;
    }
    let stats = m.stats();
    assert_eq!(stats.describe_calls, 1);
    assert_eq!(stats.list_points_calls, 1);
    assert_eq!(stats.exists_calls, 1);
}
