//! Site configuration (`site.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::authors::Author;

/// Top-level configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSettings,

    #[serde(default = "default_locales")]
    pub locales: Vec<LocaleConfig>,

    #[serde(default = "default_authors")]
    pub authors: Vec<Author>,
}

/// The `[site]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_title")]
    pub title: String,

    /// Absolute origin, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_copyright")]
    pub copyright: String,

    /// Directory holding `articles/` and the per-locale `<code>/articles/`
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_favicon")]
    pub favicon: String,

    /// XSL stylesheet referenced from generated feeds
    #[serde(default = "default_feed_stylesheet")]
    pub feed_stylesheet: Option<String>,

    /// Pattern for human-readable dates, e.g. `DD MMMM, YYYY`
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

/// A `[[locales]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LocaleConfig {
    /// Directory name for non-root locales (`en` -> `en/articles`)
    pub code: String,

    /// Language tag used in feeds and date formatting
    pub lang: String,

    pub label: String,

    /// `/` for the root locale, `/<code>` otherwise
    pub link: String,

    pub description: String,

    #[serde(default)]
    pub nav: Vec<NavLink>,
}

/// A navigation link.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NavLink {
    pub text: String,
    pub link: String,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Exactly one locale must have link \"/\", found {0}")]
    RootLocale(usize),

    #[error("Duplicate locale code `{0}`")]
    DuplicateLocale(String),
}

impl SiteConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("{} not found, using default configuration", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Parse and check a TOML configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        let roots = self.locales.iter().filter(|l| l.is_root()).count();
        if roots != 1 {
            return Err(ConfigError::RootLocale(roots));
        }

        for (i, locale) in self.locales.iter().enumerate() {
            if self.locales[..i].iter().any(|l| l.code == locale.code) {
                return Err(ConfigError::DuplicateLocale(locale.code.clone()));
            }
        }

        Ok(())
    }

    /// The locale served from `/`.
    ///
    /// A loaded configuration always has exactly one; hand-built ones may not.
    pub fn root_locale(&self) -> Option<&LocaleConfig> {
        self.locales.iter().find(|l| l.is_root())
    }

    /// Look up a locale by code.
    pub fn locale(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|l| l.code == code)
    }

    /// Directory holding the articles of `locale`.
    pub fn articles_dir(&self, locale: &LocaleConfig) -> PathBuf {
        if locale.is_root() {
            self.site.content_dir.join("articles")
        } else {
            self.site.content_dir.join(&locale.code).join("articles")
        }
    }

    /// Output directory for files belonging to `locale`.
    pub fn output_dir(&self, locale: &LocaleConfig) -> PathBuf {
        if locale.is_root() {
            self.site.output.clone()
        } else {
            self.site.output.join(&locale.code)
        }
    }

    /// Absolute URL for a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.site.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl LocaleConfig {
    /// Whether this locale is served from the site root.
    pub fn is_root(&self) -> bool {
        self.link == "/"
    }

    /// URL prefix for pages of this locale: empty for root, `/en` otherwise.
    pub fn url_prefix(&self) -> &str {
        self.link.trim_end_matches('/')
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteSettings::default(),
            locales: default_locales(),
            authors: default_authors(),
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            copyright: default_copyright(),
            content_dir: default_content_dir(),
            output: default_output(),
            favicon: default_favicon(),
            feed_stylesheet: default_feed_stylesheet(),
            date_format: default_date_format(),
        }
    }
}

fn default_title() -> String {
    "JS F/k".to_string()
}
fn default_base_url() -> String {
    "https://js-f-k.netlify.app".to_string()
}
fn default_copyright() -> String {
    "CC-BY-NC-SA 4.0 © 2025 JS F/k Team".to_string()
}
fn default_content_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_favicon() -> String {
    "/images/favicon.ico".to_string()
}
fn default_feed_stylesheet() -> Option<String> {
    Some("/pretty-feed-v3.xsl".to_string())
}
fn default_date_format() -> String {
    "DD MMMM, YYYY".to_string()
}

fn nav(items: &[(&str, &str)]) -> Vec<NavLink> {
    items
        .iter()
        .map(|(text, link)| NavLink {
            text: text.to_string(),
            link: link.to_string(),
        })
        .collect()
}

fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "ru".to_string(),
            lang: "ru".to_string(),
            label: "Русский".to_string(),
            link: "/".to_string(),
            description: "HTML/TS/Vue — с примерами, по делу, без воды".to_string(),
            nav: nav(&[
                ("Статьи по датам", "/articles-by-date"),
                ("Статьи по тегам", "/articles-by-tag"),
            ]),
        },
        LocaleConfig {
            code: "en".to_string(),
            lang: "en".to_string(),
            label: "English".to_string(),
            link: "/en".to_string(),
            description: "HTML/TS/Vue — with examples, to the point, no fluff".to_string(),
            nav: nav(&[
                ("Articles by date", "/en/articles-by-date"),
                ("Articles by tag", "/en/articles-by-tag"),
            ]),
        },
    ]
}

fn default_authors() -> Vec<Author> {
    ["VChet", "rudnovd"]
        .iter()
        .map(|handle| Author {
            id: handle.to_lowercase(),
            name: handle.to_string(),
            avatar: format!("https://github.com/{}.png", handle),
            url: format!("https://github.com/{}", handle),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn defaults_describe_bilingual_site() {
        let config = SiteConfig::default();

        assert_eq!(config.root_locale().unwrap().code, "ru");
        assert_eq!(config.locales.len(), 2);
        assert_eq!(config.authors[0].id, "vchet");
        assert_eq!(config.authors[0].avatar, "https://github.com/VChet.png");
    }

    #[test]
    fn derives_locale_paths() {
        let config = SiteConfig::default();
        let ru = config.locale("ru").unwrap();
        let en = config.locale("en").unwrap();

        assert_eq!(config.articles_dir(ru), PathBuf::from("./articles"));
        assert_eq!(config.articles_dir(en), PathBuf::from("./en/articles"));
        assert_eq!(config.output_dir(ru), PathBuf::from("dist"));
        assert_eq!(config.output_dir(en), PathBuf::from("dist/en"));
        assert_eq!(ru.url_prefix(), "");
        assert_eq!(en.url_prefix(), "/en");
    }

    #[test]
    fn builds_absolute_urls() {
        let config = SiteConfig::default();

        assert_eq!(
            config.absolute_url("/en/articles/x"),
            "https://js-f-k.netlify.app/en/articles/x"
        );
    }

    #[test]
    fn parses_partial_toml() {
        let config = SiteConfig::from_toml(
            r#"
[site]
title = "Notes"
output = "public"
feed_stylesheet = "/feed.xsl"
"#,
        )
        .unwrap();

        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.site.output, PathBuf::from("public"));
        assert_eq!(config.site.date_format, "DD MMMM, YYYY");
        assert_eq!(config.site.feed_stylesheet.as_deref(), Some("/feed.xsl"));
        assert_eq!(config.locales.len(), 2);
    }

    #[test]
    fn rejects_config_without_root_locale() {
        let result = SiteConfig::from_toml(
            r#"
[[locales]]
code = "en"
lang = "en"
label = "English"
link = "/en"
description = "x"
"#,
        );

        assert!(matches!(result, Err(ConfigError::RootLocale(0))));
    }

    #[test]
    fn rejects_duplicate_locale_codes() {
        let result = SiteConfig::from_toml(
            r#"
[[locales]]
code = "ru"
lang = "ru"
label = "A"
link = "/"
description = "x"

[[locales]]
code = "ru"
lang = "ru"
label = "B"
link = "/ru"
description = "y"
"#,
        );

        assert!(matches!(result, Err(ConfigError::DuplicateLocale(code)) if code == "ru"));
    }

    #[test]
    fn hand_built_config_may_lack_root_locale() {
        let mut config = SiteConfig::default();
        config.locales.clear();

        assert_eq!(config.root_locale(), None);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = SiteConfig::load(&temp.path().join("site.toml")).unwrap();

        assert_eq!(config.site.title, "JS F/k");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "[site\ntitle = ").unwrap();

        assert!(matches!(
            SiteConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
