//! Translation coverage of non-root locales.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::discover_markdown;
use crate::config::{LocaleConfig, SiteConfig};

/// How much of the root locale a locale has translated.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranslationReport {
    pub lang: String,
    pub total: usize,
    pub translated: usize,
    pub percent: u32,
    /// Source file names without a translation
    pub missing: Vec<String>,
}

/// A shields.io endpoint badge.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub schema_version: u8,
    pub label: String,
    pub message: String,
    pub color: &'static str,
    pub style: &'static str,
}

impl From<&TranslationReport> for Badge {
    fn from(report: &TranslationReport) -> Self {
        Self {
            schema_version: 1,
            label: report.lang.clone(),
            message: format!("{}%", report.percent),
            color: badge_color(report.percent),
            style: "flat-square",
        }
    }
}

/// Errors that can occur while measuring translations.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("No root locale configured")]
    NoRootLocale,

    #[error("No source articles found in {0}")]
    NoSourceArticles(String),

    #[error("Failed to serialize badge: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn file_names(dir: &Path) -> Vec<String> {
    discover_markdown(dir)
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect()
}

/// Compare the root locale's article files with those of `locale`.
pub fn coverage(
    config: &SiteConfig,
    locale: &LocaleConfig,
) -> Result<TranslationReport, TranslationError> {
    let root = config.root_locale().ok_or(TranslationError::NoRootLocale)?;
    let source_dir = config.articles_dir(root);
    let sources = file_names(&source_dir);
    if sources.is_empty() {
        return Err(TranslationError::NoSourceArticles(
            source_dir.display().to_string(),
        ));
    }

    let translated: HashSet<String> = file_names(&config.articles_dir(locale))
        .into_iter()
        .collect();

    let missing: Vec<String> = sources
        .iter()
        .filter(|name| !translated.contains(*name))
        .cloned()
        .collect();

    let total = sources.len();
    let done = total - missing.len();

    Ok(TranslationReport {
        lang: locale.code.clone(),
        total,
        translated: done,
        percent: round_percent(done, total),
        missing,
    })
}

/// `done / total` as a percentage, rounding halves up.
fn round_percent(done: usize, total: usize) -> u32 {
    ((done * 200 + total) / (2 * total)) as u32
}

/// Badge colour for a coverage percentage.
pub fn badge_color(percent: u32) -> &'static str {
    match percent {
        100.. => "brightgreen",
        80.. => "green",
        60.. => "yellow",
        40.. => "orange",
        _ => "red",
    }
}

/// Write `<dir>/<lang>.json`, returning the path and the JSON written.
pub fn write_badge(dir: &Path, badge: &Badge) -> Result<(PathBuf, String), TranslationError> {
    fs::create_dir_all(dir).map_err(|source| TranslationError::Write {
        path: dir.display().to_string(),
        source,
    })?;

    let json = serde_json::to_string_pretty(badge)?;
    let path = dir.join(format!("{}.json", badge.label));
    fs::write(&path, format!("{}\n", json)).map_err(|source| TranslationError::Write {
        path: path.display().to_string(),
        source,
    })?;

    Ok((path, json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn touch(dir: &Path, names: &[&str]) {
        fs::create_dir_all(dir).unwrap();
        for name in names {
            fs::write(dir.join(name), "---\n---\n").unwrap();
        }
    }

    fn config_in(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.site.content_dir = root.to_path_buf();
        config
    }

    #[test]
    fn measures_coverage() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("articles"), &["a.md", "b.md", "c.md"]);
        touch(&temp.path().join("en").join("articles"), &["a.md", "extra.md"]);
        let config = config_in(temp.path());

        let report = coverage(&config, config.locale("en").unwrap()).unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.translated, 1);
        assert_eq!(report.percent, 33);
        assert_eq!(report.missing, vec!["b.md".to_string(), "c.md".to_string()]);
    }

    #[test]
    fn missing_translation_dir_is_zero_percent() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("articles"), &["a.md"]);
        let config = config_in(temp.path());

        let report = coverage(&config, config.locale("en").unwrap()).unwrap();

        assert_eq!(report.percent, 0);
        assert_eq!(Badge::from(&report).color, "red");
    }

    #[test]
    fn no_sources_is_an_error() {
        let temp = tempdir().unwrap();
        let config = config_in(temp.path());

        let result = coverage(&config, config.locale("en").unwrap());

        assert!(matches!(result, Err(TranslationError::NoSourceArticles(_))));
    }

    #[test]
    fn no_root_locale_is_an_error() {
        let temp = tempdir().unwrap();
        let mut config = config_in(temp.path());
        config.locales.retain(|l| !l.is_root());

        let result = coverage(&config, config.locale("en").unwrap());

        assert!(matches!(result, Err(TranslationError::NoRootLocale)));
    }

    #[test]
    fn rounds_halves_up() {
        assert_eq!(round_percent(1, 8), 13);
        assert_eq!(round_percent(1, 3), 33);
        assert_eq!(round_percent(2, 3), 67);
        assert_eq!(round_percent(0, 5), 0);
        assert_eq!(round_percent(5, 5), 100);
    }

    #[test]
    fn picks_badge_colors() {
        assert_eq!(badge_color(100), "brightgreen");
        assert_eq!(badge_color(99), "green");
        assert_eq!(badge_color(80), "green");
        assert_eq!(badge_color(60), "yellow");
        assert_eq!(badge_color(40), "orange");
        assert_eq!(badge_color(39), "red");
    }

    #[test]
    fn writes_badge_json() {
        let temp = tempdir().unwrap();
        let report = TranslationReport {
            lang: "en".to_string(),
            total: 4,
            translated: 3,
            percent: 75,
            missing: vec!["d.md".to_string()],
        };

        let (path, json) = write_badge(&temp.path().join("badges"), &Badge::from(&report)).unwrap();

        assert_eq!(path, temp.path().join("badges").join("en.json"));
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, format!("{}\n", json));
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["schemaVersion"], 1);
        assert_eq!(value["message"], "75%");
        assert_eq!(value["color"], "yellow");
        assert_eq!(value["style"], "flat-square");
    }
}
