//! Translation coverage command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use jsfk_site::translations::{coverage, write_badge};
use jsfk_site::Badge;

/// Run the translations command.
pub async fn run(config_path: &Path, json: bool, badges: PathBuf) -> Result<()> {
    let config = super::load_config(config_path)?;

    for locale in config.locales.iter().filter(|l| !l.is_root()) {
        let report = coverage(&config, locale)?;

        if json {
            let (path, badge) = write_badge(&badges, &Badge::from(&report))?;
            tracing::debug!("Wrote {}", path.display());
            println!("{}", badge);
            continue;
        }

        tracing::info!(
            "{}: {}% ({}/{})",
            report.lang,
            report.percent,
            report.translated,
            report.total
        );

        if report.missing.is_empty() {
            tracing::info!("All articles are translated.");
        } else {
            tracing::info!(
                "{} articles are missing {} translations:",
                report.missing.len(),
                report.lang.to_uppercase()
            );
            for file in &report.missing {
                tracing::info!(" - {}", file);
            }
        }
    }

    Ok(())
}
