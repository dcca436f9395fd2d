//! Article data command.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use jsfk_site::SiteBuilder;

/// Run the index command.
pub async fn run(config_path: &Path, stdout: bool) -> Result<()> {
    let builder = SiteBuilder::new(super::load_config(config_path)?);
    let catalog = builder.load()?;
    let now = Utc::now();

    if stdout {
        let indexes = builder.indexes(&catalog, now);
        let json = serde_json::to_string_pretty(&indexes).context("Failed to serialize index")?;
        println!("{}", json);
        return Ok(());
    }

    for path in builder.write_indexes(&catalog, now)? {
        tracing::info!("Wrote {}", path.display());
    }

    Ok(())
}
