//! Vietnam gold pressure scanner
//!
//! Modes:
//! 1. `single` (default) - one scan cycle, console report + JSON file
//! 2. `continuous [minutes]` - repeat cycles until the deadline
//! 3. `intelligence` - collect and print one snapshot
//! 4. `report` - print the intervention report for this run

use std::path::Path;
use std::time::Duration;
use tracing::{info, Level};

use market_data::{FeedSettings, SnapshotCollector};
use pressure_scanner::{report, HttpDispatcher, RandomSignal, ScanRunner, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = args.first().map(String::as_str).unwrap_or("single");

    let settings = Settings::load()?;
    let feed_settings = FeedSettings::load()?;

    info!(
        "Starting pressure scanner ({} mode, {} feed)",
        mode, feed_settings.gold_feed
    );

    let mut collector = SnapshotCollector::from_settings(&feed_settings)?;

    if mode == "intelligence" {
        let snapshot = collector.collect().await;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let thresholds = settings.thresholds.clone();
    let mut runner = ScanRunner::new(
        Box::new(collector),
        Box::new(HttpDispatcher::new(&settings.dispatch)?),
        Box::new(RandomSignal::new()),
        settings,
    );

    match mode {
        "single" => {
            let result = runner.run_once().await?;
            println!("{}", report::render(&result, &thresholds));

            let path = report::save_scan(&result, Path::new("."))?;
            info!("Scan saved to {}", path.display());
        }
        "continuous" => {
            let minutes: u64 = args
                .get(1)
                .map(|m| m.parse())
                .transpose()
                .map_err(|e| anyhow::anyhow!("invalid duration: {}", e))?
                .unwrap_or(60);

            let summary = runner.run_continuous(Duration::from_secs(minutes * 60)).await;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "report" => {
            let summary = runner.report();
            if summary.total_interventions == 0 {
                println!("No interventions recorded");
            } else {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
        other => {
            anyhow::bail!(
                "invalid mode '{}', expected single, continuous, intelligence or report",
                other
            );
        }
    }

    Ok(())
}
