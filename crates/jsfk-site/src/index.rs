//! Article listings: ordering, visibility, projections and tag groups.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::authors::AuthorDirectory;
use crate::catalog::{Article, LocaleArticles};
use crate::colors::tag_color;
use crate::config::{NavLink, SiteConfig};
use crate::dates::{format_date, is_future};
use crate::locales::UiStrings;

/// How many related articles each entry carries.
pub const RELATED_LIMIT: usize = 3;

/// Newest first; undated articles sort last.
pub fn newest_first(a: &Article, b: &Article) -> Ordering {
    match (a.date(), b.date()) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort articles newest first. The sort is stable.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(newest_first);
}

/// Which articles a listing may show.
#[derive(Debug, Clone, Copy)]
pub struct Visibility {
    pub include_drafts: bool,
    pub include_future: bool,
    pub now: DateTime<Utc>,
}

impl Visibility {
    /// Site listings: published articles, including scheduled ones.
    pub fn listing(now: DateTime<Utc>) -> Self {
        Self {
            include_drafts: false,
            include_future: true,
            now,
        }
    }

    /// Feeds and sitemaps: only articles that are already out.
    pub fn released(now: DateTime<Utc>) -> Self {
        Self {
            include_drafts: false,
            include_future: false,
            now,
        }
    }

    pub fn allows(&self, article: &Article) -> bool {
        if article.is_draft() || article.date().is_none() {
            return self.include_drafts;
        }
        match article.date() {
            Some(date) if is_future(date, &self.now) => self.include_future,
            _ => true,
        }
    }
}

/// Visible articles, newest first.
pub fn select<'a>(articles: &'a [Article], visibility: &Visibility) -> Vec<&'a Article> {
    let mut selected: Vec<&Article> = articles.iter().filter(|a| visibility.allows(a)).collect();
    selected.sort_by(|a, b| newest_first(a, b));
    selected
}

/// Minimal projection used by listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArticleRef {
    pub url: String,
    pub title: String,
    pub date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl From<&Article> for ArticleRef {
    fn from(article: &Article) -> Self {
        Self {
            url: article.url.clone(),
            title: article.frontmatter.title.clone(),
            date: article.date().copied(),
            tags: article.frontmatter.tags.clone(),
        }
    }
}

/// Summary of an article as shown on listing pages.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleEntry {
    pub url: String,
    pub lang: String,
    pub title: String,
    pub description: String,
    /// Human-readable date in the article's language
    pub date: String,
    pub datetime: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub authors: Vec<String>,
    pub hero: Option<String>,
    /// Link title attribute, e.g. "Go to article Slots"
    pub link_title: String,
    /// Scheduled articles are kept out of search engines until their date
    pub noindex: bool,
    pub related: Vec<ArticleRef>,
}

impl ArticleEntry {
    pub fn new(article: &Article, date_format: &str, now: &DateTime<Utc>) -> Self {
        let strings = UiStrings::for_lang(&article.lang);
        let fm = &article.frontmatter;

        Self {
            url: article.url.clone(),
            lang: article.lang.clone(),
            title: fm.title.clone(),
            description: fm.description.clone(),
            date: article
                .date()
                .map(|d| format_date(d, date_format, &article.lang))
                .unwrap_or_default(),
            datetime: article.date().copied(),
            tags: fm.tags.clone(),
            authors: fm.author.ids().to_vec(),
            hero: fm.hero.clone(),
            link_title: UiStrings::fill(strings.article_title, &fm.title),
            noindex: article.date().is_some_and(|d| is_future(d, now)),
            related: Vec::new(),
        }
    }
}

/// Articles sharing a tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagGroup {
    pub tag: String,
    pub color: String,
    /// Link title attribute, e.g. "Go to tag vue"
    pub label: String,
    pub articles: Vec<ArticleRef>,
}

/// Group articles by tag. Tags are sorted; each group keeps the input order.
pub fn group_by_tag(articles: &[&Article], lang: &str) -> Vec<TagGroup> {
    let strings = UiStrings::for_lang(lang);
    let mut groups: BTreeMap<&str, Vec<ArticleRef>> = BTreeMap::new();

    for article in articles {
        let tags: BTreeSet<&str> = article.frontmatter.tags.iter().map(String::as_str).collect();
        for tag in tags {
            groups.entry(tag).or_default().push(ArticleRef::from(*article));
        }
    }

    groups
        .into_iter()
        .map(|(tag, articles)| TagGroup {
            tag: tag.to_string(),
            color: tag_color(tag),
            label: UiStrings::fill(strings.tag_title, tag),
            articles,
        })
        .collect()
}

/// Other articles ranked by shared tags, then recency.
///
/// Articles with no tag in common are left out.
pub fn related<'a>(article: &Article, pool: &[&'a Article], limit: usize) -> Vec<&'a Article> {
    let tags: BTreeSet<&str> = article.frontmatter.tags.iter().map(String::as_str).collect();

    let mut scored: Vec<(usize, &Article)> = pool
        .iter()
        .filter(|other| other.url != article.url)
        .filter_map(|other| {
            let shared = other
                .frontmatter
                .tags
                .iter()
                .map(String::as_str)
                .collect::<BTreeSet<_>>()
                .intersection(&tags)
                .count();
            (shared > 0).then_some((shared, *other))
        })
        .collect();

    scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| newest_first(a, b)));
    scored.into_iter().take(limit).map(|(_, a)| a).collect()
}

/// Data bundle for one locale, consumed by the site's listing pages.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleIndex {
    pub code: String,
    pub lang: String,
    pub title: String,
    pub description: String,
    pub strings: UiStrings,
    pub nav: Vec<NavLink>,
    pub authors: AuthorDirectory,
    pub articles: Vec<ArticleEntry>,
    pub tags: Vec<TagGroup>,
}

impl LocaleIndex {
    pub fn build(
        config: &SiteConfig,
        locale: &LocaleArticles,
        authors: &AuthorDirectory,
        now: DateTime<Utc>,
    ) -> Self {
        let visible = select(&locale.articles, &Visibility::listing(now));

        let articles = visible
            .iter()
            .map(|article| {
                let mut entry = ArticleEntry::new(article, &config.site.date_format, &now);
                entry.related = related(article, &visible, RELATED_LIMIT)
                    .into_iter()
                    .map(ArticleRef::from)
                    .collect();
                entry
            })
            .collect();

        Self {
            code: locale.locale.code.clone(),
            lang: locale.locale.lang.clone(),
            title: config.site.title.clone(),
            description: locale.locale.description.clone(),
            strings: *UiStrings::for_lang(&locale.locale.lang),
            nav: locale.locale.nav.clone(),
            authors: authors.clone(),
            articles,
            tags: group_by_tag(&visible, &locale.locale.lang),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use jsfk_content::{Authors, Frontmatter};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    pub(crate) fn article(slug: &str, date: Option<(i32, u32, u32)>, tags: &[&str]) -> Article {
        let date = date.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap());
        Article {
            slug: slug.to_string(),
            url: format!("/articles/{}", slug),
            lang: "ru".to_string(),
            frontmatter: Frontmatter {
                title: slug.to_uppercase(),
                description: format!("About {}", slug),
                author: Authors::One("vchet".to_string()),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                date,
                publish: if date.is_none() { Some(false) } else { None },
                hero: None,
            },
            content: format!("# {}\n", slug),
            html: format!("<h1>{}</h1>\n", slug),
            source_path: PathBuf::from(format!("articles/{}.md", slug)),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn slugs(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.slug.clone()).collect()
    }

    #[test]
    fn sorts_newest_first_with_drafts_last() {
        let mut articles = vec![
            article("draft", None, &["vue"]),
            article("old", Some((2024, 1, 1)), &["vue"]),
            article("new", Some((2025, 3, 1)), &["vue"]),
        ];

        sort_newest_first(&mut articles);

        let order: Vec<_> = articles.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(order, vec!["new", "old", "draft"]);
    }

    #[test]
    fn listing_hides_drafts_but_keeps_scheduled() {
        let articles = vec![
            article("draft", None, &["vue"]),
            article("scheduled", Some((2025, 12, 1)), &["vue"]),
            article("out", Some((2025, 1, 1)), &["vue"]),
        ];

        let listing = select(&articles, &Visibility::listing(now()));
        let released = select(&articles, &Visibility::released(now()));

        assert_eq!(slugs(&listing), vec!["scheduled", "out"]);
        assert_eq!(slugs(&released), vec!["out"]);
    }

    #[test]
    fn entry_formats_date_and_flags_future() {
        let scheduled = article("teleport", Some((2025, 10, 16)), &["vue"]);

        let entry = ArticleEntry::new(&scheduled, "DD MMMM, YYYY", &now());

        assert_eq!(entry.date, "16 октября, 2025");
        assert_eq!(entry.link_title, "Перейти к статье TELEPORT");
        assert_eq!(entry.authors, vec!["vchet".to_string()]);
        assert!(entry.noindex);
    }

    #[test]
    fn groups_by_sorted_tag() {
        let a = article("a", Some((2025, 2, 1)), &["vue", "html", "vue"]);
        let b = article("b", Some((2025, 1, 1)), &["rust"]);

        let groups = group_by_tag(&[&a, &b], "en");

        let tags: Vec<_> = groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(tags, vec!["html", "rust", "vue"]);
        assert_eq!(groups[2].articles.len(), 1);
        assert_eq!(groups[2].color, "#41b883");
        assert_eq!(groups[1].label, "Go to tag rust");
    }

    #[test]
    fn ranks_related_by_shared_tags() {
        let base = article("base", Some((2025, 1, 1)), &["vue", "ts"]);
        let one_new = article("one-new", Some((2025, 5, 1)), &["vue"]);
        let two = article("two", Some((2024, 1, 1)), &["vue", "ts"]);
        let one_old = article("one-old", Some((2024, 5, 1)), &["ts"]);
        let none = article("none", Some((2025, 5, 1)), &["css"]);
        let pool = [&base, &one_new, &two, &one_old, &none];

        let found = related(&base, &pool, 2);

        assert_eq!(slugs(&found), vec!["two", "one-new"]);
    }

    #[test]
    fn builds_locale_bundle() {
        let config = SiteConfig::default();
        let locale = LocaleArticles {
            locale: config.root_locale().unwrap().clone(),
            articles: vec![
                article("a", Some((2025, 2, 1)), &["vue"]),
                article("b", Some((2025, 3, 1)), &["vue"]),
                article("c", None, &["vue"]),
            ],
        };
        let authors = AuthorDirectory::new(config.authors.clone());

        let index = LocaleIndex::build(&config, &locale, &authors, now());

        assert_eq!(index.articles.len(), 2);
        assert_eq!(index.articles[0].url, "/articles/b");
        assert_eq!(index.articles[0].related[0].url, "/articles/a");
        assert_eq!(index.tags.len(), 1);
        assert_eq!(index.strings.related_articles, "Похожие статьи");

        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(json["authors"]["vchet"]["name"], "VChet");
        assert_eq!(json["articles"][0]["linkTitle"], "Перейти к статье B");
        assert_eq!(json["strings"]["avatarAlt"], "Аватар {}");
    }
}
