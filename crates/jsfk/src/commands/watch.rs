//! Watch mode: rebuild whenever articles or the config change.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use jsfk_site::{SiteBuilder, SiteConfig};

use crate::watcher::{FileWatcher, WatchEvent};

/// Run the watch command.
pub async fn run(config_path: &Path) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    rebuild(&config);

    let (_watcher, mut events) = FileWatcher::new(&watched_dirs(&config), config_path)
        .context("Failed to start file watcher")?;

    tracing::info!("Watching for changes (Ctrl+C to stop)");

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };

                match event {
                    WatchEvent::Config(path) => {
                        tracing::info!("Config changed: {}", path.display());
                        match SiteConfig::load(config_path) {
                            Ok(reloaded) => config = reloaded,
                            Err(e) => {
                                tracing::error!("{}", e);
                                continue;
                            }
                        }
                    }
                    WatchEvent::Article(path) => {
                        tracing::info!("Changed: {}", path.display());
                    }
                }

                rebuild(&config);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping watcher");
                break;
            }
        }
    }

    Ok(())
}

/// Article directory of every locale.
fn watched_dirs(config: &SiteConfig) -> Vec<PathBuf> {
    config
        .locales
        .iter()
        .map(|locale| config.articles_dir(locale))
        .collect()
}

/// Build once, logging failures instead of stopping the watch loop.
fn rebuild(config: &SiteConfig) {
    match SiteBuilder::new(config.clone()).build(Utc::now()) {
        Ok(result) => tracing::info!(
            "Rebuilt {} articles in {}ms",
            result.articles,
            result.duration_ms
        ),
        Err(e) => tracing::error!("Build failed: {}", e),
    }
}
