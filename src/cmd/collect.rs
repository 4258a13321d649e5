use crate::modules::aggregator::StatsAggregator;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct CollectArgs {}

/// Collect the records from every platform and dump them as JSON, for
/// inspection without touching any README.
pub async fn run(_args: CollectArgs) -> Result<()> {
    let aggregator = StatsAggregator::new();
    let stats = aggregator.collect_stats().await;

    let json =
        serde_json::to_string_pretty(&stats).context("failed to serialize collected stats")?;
    println!("{}", json);

    Ok(())
}
