use std::sync::Arc;

use tagpull::{AggregationMode, Period, PointId, RetrievalOptions, Tagpull, TimeWindow};
use tagpull_mock::MockHistorian;
use tagpull_mock::fixtures::{at, points};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,tagpull=trace (build with --features tracing)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    // 1. Build a client over the fixture historian.
    let client = Tagpull::builder()
        .with_historian(Arc::new(MockHistorian::new()))
        .build()?;

    let load = PointId::new(points::ADE1CA02)?;
    let window = TimeWindow::new(at(0), at(30));

    // 2. Raw samples, millisecond resolution.
    let opts = RetrievalOptions::labeled("Load").high_speed(true);
    let raw = client
        .series_with(&load, window, AggregationMode::Raw, None, &opts)
        .await;
    println!("{} raw samples for {}", raw.series.len(), raw.series.label);
    for s in &raw.series.samples {
        println!("  {}  {:>6.1}", s.ts.format("%H:%M:%S%.3f"), s.value);
    }

    // 3. Ten-second averages.
    let avg = client
        .series(&load, window, AggregationMode::Average, Some(Period::from_secs(10)))
        .await;
    println!("averages: {:?}", avg.series.values().collect::<Vec<_>>());

    // 4. Missing points come back empty with a warning.
    let missing = client
        .series(&PointId::new(points::MISSING)?, window, AggregationMode::Raw, None)
        .await;
    for w in &missing.warnings {
        println!("warning: {w}");
    }

    Ok(())
}
