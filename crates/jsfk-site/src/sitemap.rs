//! Sitemap generation.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::index::{select, Visibility};
use crate::templates::TemplateEngine;

/// A `<url>` entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: Option<String>,
}

/// Errors that can occur while generating the sitemap.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    #[error("Failed to render sitemap: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Every indexable URL: locale homes, their nav pages and released articles.
///
/// Drafts and scheduled articles are left out until their date passes.
pub fn sitemap_urls(config: &SiteConfig, catalog: &Catalog, now: DateTime<Utc>) -> Vec<SitemapUrl> {
    let mut urls = Vec::new();

    for entry in &catalog.locales {
        let locale = &entry.locale;

        urls.push(SitemapUrl {
            loc: config.absolute_url(&locale.link),
            lastmod: None,
        });
        urls.extend(locale.nav.iter().map(|nav| SitemapUrl {
            loc: config.absolute_url(&nav.link),
            lastmod: None,
        }));

        for article in select(&entry.articles, &Visibility::released(now)) {
            urls.push(SitemapUrl {
                loc: config.absolute_url(&article.url),
                lastmod: article.date().map(|d| d.format("%Y-%m-%d").to_string()),
            });
        }
    }

    urls
}

/// Write `sitemap.xml` at the output root.
pub fn write_sitemap(
    config: &SiteConfig,
    urls: &[SitemapUrl],
    templates: &TemplateEngine,
) -> Result<PathBuf, SitemapError> {
    let xml = templates.render_sitemap(urls)?;

    fs::create_dir_all(&config.site.output).map_err(|source| SitemapError::Write {
        path: config.site.output.display().to_string(),
        source,
    })?;

    let path = config.site.output.join("sitemap.xml");
    fs::write(&path, xml).map_err(|source| SitemapError::Write {
        path: path.display().to_string(),
        source,
    })?;

    tracing::debug!("Wrote {} sitemap entries", urls.len());
    Ok(path)
}
