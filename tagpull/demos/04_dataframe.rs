use std::sync::Arc;

use tagpull::{LabelSource, PointId, Tagpull, TimeWindow, ToDataFrame};
use tagpull_mock::MockHistorian;
use tagpull_mock::fixtures::{at, points};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Tagpull::builder()
        .with_historian(Arc::new(MockHistorian::new()))
        .label_source(LabelSource::Description)
        .build()?;

    let report = client
        .merge()
        .points(&[PointId::new(points::ADE1CA02)?, PointId::new(points::ADE1CA03)?])
        .window(TimeWindow::new(at(0), at(30)))
        .run()
        .await?;

    let df = report.table.to_dataframe()?;
    println!("{df}");
    Ok(())
}
