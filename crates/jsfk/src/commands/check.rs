//! Frontmatter validation command.

use std::path::Path;

use anyhow::{bail, Result};
use jsfk_site::SiteBuilder;

/// Run the check command.
pub async fn run(config_path: &Path) -> Result<()> {
    let builder = SiteBuilder::new(super::load_config(config_path)?);
    let reports = builder.check()?;

    let mut invalid = 0;
    for report in &reports {
        if report.is_valid() {
            tracing::debug!("{}: ok", report.path.display());
            continue;
        }

        invalid += 1;
        for violation in &report.violations {
            tracing::error!("{}: {}", report.path.display(), violation);
        }
    }

    if invalid > 0 {
        bail!("{} of {} article(s) have invalid frontmatter", invalid, reports.len());
    }

    tracing::info!("Checked {} article(s), all valid", reports.len());
    Ok(())
}
