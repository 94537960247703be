use std::sync::Arc;
use std::time::Duration;

use tagpull::{
    CacheConfig, Historian, HistorianBuilder, PointId, QuerySlotConfig, Tagpull, TimeWindow,
};
use tagpull_mock::MockHistorian;
use tagpull_mock::fixtures::{at, points};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let mock = Arc::new(MockHistorian::new().with_latency(Duration::from_millis(5)));
    let raw: Arc<dyn Historian> = mock.clone();

    // Cache(QuerySlots(Raw)): metadata is memoized, cursors are capped at two.
    let builder = HistorianBuilder::new(raw)
        .with_query_slots(QuerySlotConfig { max_open: 2 })
        .with_cache(&CacheConfig::default());
    println!("{}", serde_json::to_string_pretty(&builder.to_stack())?);

    let client = Tagpull::builder()
        .with_historian(builder.build()?)
        .max_concurrent_points(4)
        .build()?;

    let ids = [
        points::ADE1CA02,
        points::ADE1CA03,
        points::ADE1CA04,
        points::ADE1CA12,
    ]
    .into_iter()
    .map(PointId::new)
    .collect::<Result<Vec<_>, _>>()?;

    for _ in 0..2 {
        let report = client
            .merge()
            .points(&ids)
            .window(TimeWindow::new(at(0), at(30)))
            .run()
            .await?;
        println!("{} rows x {} columns", report.table.len(), report.table.columns.len());
    }

    let stats = mock.stats();
    println!(
        "exists calls: {}, opens: {}, peak open cursors: {}",
        stats.exists_calls, stats.opens, stats.max_open
    );
    Ok(())
}
