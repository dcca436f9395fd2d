//! Article discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use walkdir::WalkDir;

use jsfk_content::{parse_article, render_html, Frontmatter, FrontmatterError, ParseError};

use crate::config::{LocaleConfig, SiteConfig};

/// A loaded article.
#[derive(Debug, Clone)]
pub struct Article {
    /// File stem, e.g. `optional-chaining`
    pub slug: String,

    /// Site-relative clean URL, e.g. `/en/articles/optional-chaining`
    pub url: String,

    /// Language tag of the owning locale
    pub lang: String,

    pub frontmatter: Frontmatter,

    /// Markdown body without frontmatter
    pub content: String,

    /// Rendered body
    pub html: String,

    pub source_path: PathBuf,
}

impl Article {
    pub fn date(&self) -> Option<&DateTime<Utc>> {
        self.frontmatter.date.as_ref()
    }

    pub fn is_draft(&self) -> bool {
        self.frontmatter.is_draft()
    }
}

/// Errors that can occur while loading articles.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("{path}: missing frontmatter")]
    MissingFrontmatter { path: String },

    #[error("{path}: {source}")]
    Frontmatter {
        path: String,
        #[source]
        source: FrontmatterError,
    },
}

/// List the `*.md` files directly inside `dir`, sorted by file name.
///
/// A missing or unreadable directory yields an empty list.
pub fn discover_markdown(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::debug!("Article directory not found: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("md"))
        .collect();

    files.sort();
    files
}

/// Load every article of `locale` from `dir`.
pub fn load_articles(dir: &Path, locale: &LocaleConfig) -> Result<Vec<Article>, CatalogError> {
    discover_markdown(dir)
        .par_iter()
        .map(|path| load_article(path, locale))
        .collect()
}

/// Load a single article file.
pub fn load_article(path: &Path, locale: &LocaleConfig) -> Result<Article, CatalogError> {
    let display = path.display().to_string();

    let source = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: display.clone(),
        source,
    })?;

    let doc = parse_article(&source).map_err(|source| CatalogError::Parse {
        path: display.clone(),
        source,
    })?;

    let Some(mapping) = doc.frontmatter else {
        return Err(CatalogError::MissingFrontmatter { path: display });
    };

    let frontmatter = Frontmatter::from_mapping(mapping).map_err(|source| {
        CatalogError::Frontmatter {
            path: display.clone(),
            source,
        }
    })?;

    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(Article {
        url: format!("{}/articles/{}", locale.url_prefix(), slug),
        slug,
        lang: locale.lang.clone(),
        html: render_html(&doc.content),
        content: doc.content,
        frontmatter,
        source_path: path.to_path_buf(),
    })
}

/// Articles of one locale.
#[derive(Debug, Clone)]
pub struct LocaleArticles {
    pub locale: LocaleConfig,
    pub articles: Vec<Article>,
}

/// All articles of the site, grouped by locale in configuration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub locales: Vec<LocaleArticles>,
}

impl Catalog {
    /// Load the articles of every configured locale.
    pub fn load(config: &SiteConfig) -> Result<Self, CatalogError> {
        let mut locales = Vec::with_capacity(config.locales.len());

        for locale in &config.locales {
            let dir = config.articles_dir(locale);
            let articles = load_articles(&dir, locale)?;
            tracing::debug!(
                "Loaded {} articles for locale {} from {}",
                articles.len(),
                locale.code,
                dir.display()
            );
            locales.push(LocaleArticles {
                locale: locale.clone(),
                articles,
            });
        }

        Ok(Self { locales })
    }

    /// Articles of the locale with the given code.
    pub fn locale(&self, code: &str) -> Option<&LocaleArticles> {
        self.locales.iter().find(|l| l.locale.code == code)
    }

    /// Number of articles across all locales.
    pub fn total(&self) -> usize {
        self.locales.iter().map(|l| l.articles.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const ARTICLE: &str = "---\ntitle: Slots\ndescription: Scoped slots\nauthor: vchet\ntags: [vue]\ndate: 2025-05-05\n---\n\n# Slots\n\nBody *text*.\n";

    fn write(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn discovers_only_top_level_markdown() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("articles");
        write(&dir, "b.md", ARTICLE);
        write(&dir, "a.md", ARTICLE);
        write(&dir, "notes.txt", "x");
        write(&dir.join("nested"), "c.md", ARTICLE);

        let files = discover_markdown(&dir);

        assert_eq!(files, vec![dir.join("a.md"), dir.join("b.md")]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let temp = tempdir().unwrap();

        assert!(discover_markdown(&temp.path().join("nope")).is_empty());
    }

    #[test]
    fn loads_articles_with_locale_urls() {
        let temp = tempdir().unwrap();
        let config = SiteConfig::default();
        let en = config.locale("en").unwrap();
        let dir = temp.path().join("en").join("articles");
        write(&dir, "slots.md", ARTICLE);

        let articles = load_articles(&dir, en).unwrap();

        assert_eq!(articles.len(), 1);
        let article = &articles[0];
        assert_eq!(article.slug, "slots");
        assert_eq!(article.url, "/en/articles/slots");
        assert_eq!(article.lang, "en");
        assert_eq!(article.frontmatter.title, "Slots");
        assert!(article.html.contains("<em>text</em>"));
    }

    #[test]
    fn article_without_frontmatter_fails() {
        let temp = tempdir().unwrap();
        let config = SiteConfig::default();
        let dir = temp.path().join("articles");
        write(&dir, "bare.md", "# Bare\n");

        let result = load_articles(&dir, config.root_locale().unwrap());

        assert!(matches!(
            result,
            Err(CatalogError::MissingFrontmatter { .. })
        ));
    }

    #[test]
    fn article_with_wrong_frontmatter_schema_fails() {
        let temp = tempdir().unwrap();
        let config = SiteConfig::default();
        let dir = temp.path().join("articles");
        write(
            &dir,
            "someday.md",
            "---\ntitle: Later\ndescription: d\nauthor: vchet\ntags: [vue]\ndate: someday\n---\n",
        );

        let result = load_articles(&dir, config.root_locale().unwrap());

        assert!(matches!(
            result,
            Err(CatalogError::Frontmatter { .. })
        ));
    }

    #[test]
    fn catalog_loads_every_locale() {
        let temp = tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.site.content_dir = temp.path().to_path_buf();
        write(&temp.path().join("articles"), "slots.md", ARTICLE);
        write(&temp.path().join("articles"), "refs.md", ARTICLE);
        write(&temp.path().join("en").join("articles"), "slots.md", ARTICLE);

        let catalog = Catalog::load(&config).unwrap();

        assert_eq!(catalog.total(), 3);
        assert_eq!(catalog.locale("ru").unwrap().articles.len(), 2);
        assert_eq!(
            catalog.locale("ru").unwrap().articles[0].url,
            "/articles/refs"
        );
        assert_eq!(catalog.locale("en").unwrap().articles.len(), 1);
    }
}
