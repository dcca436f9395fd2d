//! Site data generation for the JS F/k blog.
//!
//! Loads articles for every locale, derives the listing data the site's pages
//! consume, and writes RSS feeds, a sitemap and translation coverage badges.

pub mod authors;
pub mod builder;
pub mod catalog;
pub mod colors;
pub mod config;
pub mod dates;
pub mod feed;
pub mod index;
pub mod locales;
pub mod sitemap;
pub mod templates;
pub mod translations;

pub use authors::{Author, AuthorDirectory};
pub use builder::{BuildError, BuildResult, FileReport, SiteBuilder, INDEX_FILE};
pub use catalog::{Article, Catalog, CatalogError};
pub use config::{ConfigError, LocaleConfig, SiteConfig};
pub use feed::{FeedBuilder, FeedError};
pub use index::{LocaleIndex, Visibility};
pub use translations::{Badge, TranslationError, TranslationReport};
