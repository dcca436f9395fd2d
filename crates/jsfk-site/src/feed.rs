//! RSS feed generation.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Article, LocaleArticles};
use crate::config::{LocaleConfig, SiteConfig};
use crate::index::{select, Visibility};
use crate::templates::TemplateEngine;

/// Channel metadata of a locale's feed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedChannel {
    pub title: String,
    pub description: String,
    pub copyright: String,
    pub id: String,
    pub link: String,
    pub language: String,
    pub favicon: String,
    /// Self link of the feed document
    pub rss_link: String,
    pub updated: DateTime<Utc>,
}

impl FeedChannel {
    pub fn for_locale(config: &SiteConfig, locale: &LocaleConfig, updated: DateTime<Utc>) -> Self {
        let link = format!(
            "{}{}",
            config.site.base_url.trim_end_matches('/'),
            locale.url_prefix()
        );

        Self {
            title: config.site.title.clone(),
            description: locale.description.clone(),
            copyright: config.site.copyright.clone(),
            id: link.clone(),
            rss_link: format!("{}/rss.xml", link),
            link,
            language: locale.lang.clone(),
            favicon: config.absolute_url(&config.site.favicon),
            updated,
        }
    }
}

/// A feed entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub id: String,
    pub link: String,
    pub date: DateTime<Utc>,
    pub description: String,
    /// Rendered article body
    pub content: String,
}

impl FeedItem {
    /// Build an item for a dated article. Drafts have no date and no item.
    pub fn from_article(config: &SiteConfig, article: &Article) -> Option<Self> {
        let date = *article.date()?;
        let link = config.absolute_url(&article.url);

        Some(Self {
            title: article.frontmatter.title.clone(),
            id: link.clone(),
            link,
            date,
            description: article.frontmatter.description.clone(),
            content: article.html.clone(),
        })
    }
}

/// Errors that can occur while generating feeds.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Failed to render feed: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// RSS feed builder for one site.
pub struct FeedBuilder<'a> {
    config: &'a SiteConfig,
    templates: TemplateEngine,
}

impl<'a> FeedBuilder<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Feed items for released articles, newest first.
    pub fn items(&self, articles: &[Article], now: DateTime<Utc>) -> Vec<FeedItem> {
        select(articles, &Visibility::released(now))
            .into_iter()
            .filter_map(|article| FeedItem::from_article(self.config, article))
            .collect()
    }

    /// Render the RSS document of a locale.
    pub fn render(&self, locale: &LocaleArticles, now: DateTime<Utc>) -> Result<String, FeedError> {
        let items = self.items(&locale.articles, now);
        let updated = items.first().map(|item| item.date).unwrap_or(now);
        let channel = FeedChannel::for_locale(self.config, &locale.locale, updated);

        Ok(self.templates.render_rss(
            &channel,
            &items,
            self.config.site.feed_stylesheet.as_deref(),
        )?)
    }

    /// Write `rss.xml` into the locale's output directory.
    pub fn write(&self, locale: &LocaleArticles, now: DateTime<Utc>) -> Result<PathBuf, FeedError> {
        let xml = self.render(locale, now)?;

        let out_dir = self.config.output_dir(&locale.locale);
        fs::create_dir_all(&out_dir).map_err(|source| FeedError::Write {
            path: out_dir.display().to_string(),
            source,
        })?;

        let path = out_dir.join("rss.xml");
        fs::write(&path, xml).map_err(|source| FeedError::Write {
            path: path.display().to_string(),
            source,
        })?;

        tracing::info!("Generated RSS for {} locale", locale.locale.code);
        Ok(path)
    }
}
