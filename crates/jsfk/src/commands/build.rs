//! Full build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use jsfk_site::SiteBuilder;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building site data...");

    let mut config = super::load_config(config_path)?;
    if let Some(output) = output {
        config.site.output = output;
    }

    let result = SiteBuilder::new(config).build(Utc::now())?;

    tracing::info!(
        "Built {} articles and {} feeds in {}ms",
        result.articles,
        result.feeds,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
