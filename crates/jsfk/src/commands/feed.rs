//! RSS feed command.

use std::path::Path;

use anyhow::{bail, Result};
use chrono::Utc;
use jsfk_site::SiteBuilder;

/// Run the feed command.
pub async fn run(config_path: &Path, locale: Option<String>) -> Result<()> {
    let builder = SiteBuilder::new(super::load_config(config_path)?);

    if let Some(code) = &locale {
        if builder.config().locale(code).is_none() {
            bail!("Unknown locale: {}", code);
        }
    }

    let catalog = builder.load()?;
    let written = builder.write_feeds(&catalog, Utc::now(), locale.as_deref())?;

    for path in &written {
        tracing::debug!("Wrote {}", path.display());
    }

    Ok(())
}
