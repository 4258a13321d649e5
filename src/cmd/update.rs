use crate::config;
use crate::modules::{aggregator::StatsAggregator, readme, renderer};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Path to the README to patch.
    #[arg(long, default_value = "README.md")]
    readme: PathBuf,
    /// Directory where the rendered markdown is saved for inspection.
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,
}

pub async fn run(args: UpdateArgs) -> Result<()> {
    let aggregator = StatsAggregator::new();
    let stats = aggregator.collect_stats().await;

    let markdown = renderer::render(&stats);

    // The standalone artifact is best-effort; a failure here must not
    // prevent the README update.
    if !args.output_dir.exists() {
        tracing::warn!(
            "the directory {} doesn't exist, so attempt to create it",
            args.output_dir.display()
        );
        if let Err(e) = tokio::fs::create_dir_all(&args.output_dir).await {
            tracing::error!(
                "failed to create the directory {}: {}",
                args.output_dir.display(),
                e
            );
        }
    }
    readme::save_markdown(&markdown, &args.output_dir.join(config::STATS_ARTIFACT)).await;

    if readme::update_readme_section(&args.readme, &markdown, config::SECTION_HEADER).await {
        tracing::info!("{} successfully updated", args.readme.display());
        Ok(())
    } else {
        anyhow::bail!("failed to update {}", args.readme.display())
    }
}
