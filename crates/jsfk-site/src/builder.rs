//! Build pipeline: validate, load, then write indexes, feeds and the sitemap.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use jsfk_content::{Validator, Violation};

use crate::authors::AuthorDirectory;
use crate::catalog::{discover_markdown, Catalog, CatalogError};
use crate::config::SiteConfig;
use crate::feed::{FeedBuilder, FeedError};
use crate::index::LocaleIndex;
use crate::sitemap::{sitemap_urls, write_sitemap, SitemapError};
use crate::templates::TemplateEngine;

/// Name of the per-locale listing data file.
pub const INDEX_FILE: &str = "articles.data.json";

/// Validation outcome for one article file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of articles loaded across locales
    pub articles: usize,

    /// Number of feeds written
    pub feeds: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} article(s) have invalid frontmatter")]
    Invalid(usize),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Sitemap(#[from] SitemapError),

    #[error("Failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Static data builder for the blog.
pub struct SiteBuilder {
    config: SiteConfig,
    authors: AuthorDirectory,
    validator: Validator,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a new builder.
    pub fn new(config: SiteConfig) -> Self {
        let authors = AuthorDirectory::new(config.authors.clone());
        let validator = Validator::new(authors.ids());

        Self {
            config,
            authors,
            validator,
            templates: TemplateEngine::new(),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Validate the frontmatter of every article in every locale.
    ///
    /// Returns one report per file, in locale then file name order.
    pub fn check(&self) -> Result<Vec<FileReport>, BuildError> {
        let mut reports = Vec::new();

        for locale in &self.config.locales {
            let files = discover_markdown(&self.config.articles_dir(locale));
            let checked: Vec<FileReport> = files
                .par_iter()
                .map(|path| self.check_file(path))
                .collect::<Result<_, _>>()?;
            reports.extend(checked);
        }

        Ok(reports)
    }

    fn check_file(&self, path: &Path) -> Result<FileReport, BuildError> {
        let source = fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Ok(FileReport {
            path: path.to_path_buf(),
            violations: self.validator.validate_source(&source),
        })
    }

    /// Load every locale's articles.
    pub fn load(&self) -> Result<Catalog, BuildError> {
        Ok(Catalog::load(&self.config)?)
    }

    /// Per-locale listing bundles.
    pub fn indexes(&self, catalog: &Catalog, now: DateTime<Utc>) -> Vec<LocaleIndex> {
        catalog
            .locales
            .iter()
            .map(|locale| LocaleIndex::build(&self.config, locale, &self.authors, now))
            .collect()
    }

    /// Write each locale's bundle to `<locale output>/articles.data.json`.
    pub fn write_indexes(
        &self,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<Vec<PathBuf>, BuildError> {
        let mut written = Vec::new();

        for (index, entry) in self.indexes(catalog, now).iter().zip(&catalog.locales) {
            let dir = self.config.output_dir(&entry.locale);
            fs::create_dir_all(&dir).map_err(|source| BuildError::Write {
                path: dir.display().to_string(),
                source,
            })?;

            let path = dir.join(INDEX_FILE);
            let json = serde_json::to_string_pretty(index)?;
            fs::write(&path, json).map_err(|source| BuildError::Write {
                path: path.display().to_string(),
                source,
            })?;

            tracing::debug!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    /// Write RSS feeds, optionally for a single locale.
    pub fn write_feeds(
        &self,
        catalog: &Catalog,
        now: DateTime<Utc>,
        only: Option<&str>,
    ) -> Result<Vec<PathBuf>, BuildError> {
        let feeds = FeedBuilder::new(&self.config);

        catalog
            .locales
            .iter()
            .filter(|entry| only.map_or(true, |code| entry.locale.code == code))
            .map(|entry| feeds.write(entry, now).map_err(BuildError::from))
            .collect()
    }

    /// Write `sitemap.xml`.
    pub fn write_sitemap(&self, catalog: &Catalog, now: DateTime<Utc>) -> Result<PathBuf, BuildError> {
        let urls = sitemap_urls(&self.config, catalog, now);
        Ok(write_sitemap(&self.config, &urls, &self.templates)?)
    }

    /// Run the whole pipeline. Any invalid article fails the build.
    pub fn build(&self, now: DateTime<Utc>) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let invalid: Vec<FileReport> = self
            .check()?
            .into_iter()
            .filter(|report| !report.is_valid())
            .collect();
        if !invalid.is_empty() {
            for report in &invalid {
                for violation in &report.violations {
                    tracing::error!("{}: {}", report.path.display(), violation);
                }
            }
            return Err(BuildError::Invalid(invalid.len()));
        }

        let catalog = self.load()?;

        fs::create_dir_all(&self.config.site.output).map_err(|source| BuildError::Write {
            path: self.config.site.output.display().to_string(),
            source,
        })?;

        self.write_indexes(&catalog, now)?;
        let feeds = self.write_feeds(&catalog, now, None)?;
        self.write_sitemap(&catalog, now)?;

        Ok(BuildResult {
            articles: catalog.total(),
            feeds: feeds.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.site.output.clone(),
        })
    }
}
