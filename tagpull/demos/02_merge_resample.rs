use std::sync::Arc;

use tagpull::{LabelSource, Period, PointId, Tagpull, TimeWindow};
use tagpull_mock::MockHistorian;
use tagpull_mock::fixtures::{at, points};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let client = Tagpull::builder()
        .with_historian(Arc::new(MockHistorian::new()))
        .label_source(LabelSource::Description)
        .fill_limit(3)
        .build()?;

    let ids = [
        points::ADE1CA02,
        points::ADE1CA12,
        points::ADE1CA03,
        points::MISSING,
    ]
    .into_iter()
    .map(PointId::new)
    .collect::<Result<Vec<_>, _>>()?;

    let report = client
        .merge()
        .points(&ids)
        .window(TimeWindow::new(at(0), at(30)))
        .sampling_rate(Period::from_secs(2))
        .run()
        .await?;

    let table = &report.table;
    print!("{:<10}", "time");
    for label in table.labels() {
        print!(" {label:>20}");
    }
    println!();
    for (i, ts) in table.index.iter().enumerate() {
        print!("{:<10}", ts.format("%H:%M:%S"));
        for col in &table.columns {
            match &col.cells[i] {
                Some(c) => print!(" {:>20.1}", c.value),
                None => print!(" {:>20}", "-"),
            }
        }
        println!();
    }
    for w in &report.warnings {
        println!("warning: {w}");
    }

    Ok(())
}
