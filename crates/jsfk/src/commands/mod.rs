pub mod build;
pub mod check;
pub mod feed;
pub mod index;
pub mod init;
pub mod translations;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use jsfk_site::SiteConfig;

/// Load site.toml, falling back to built-in defaults when it does not exist.
/// A malformed file is an error.
pub fn load_config(path: &Path) -> Result<SiteConfig> {
    SiteConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}
