//! Frontmatter extraction and parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

/// One or more author ids from the `author` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Authors {
    One(String),
    Many(Vec<String>),
}

impl Authors {
    /// All referenced author ids, in declaration order.
    pub fn ids(&self) -> &[String] {
        match self {
            Self::One(id) => std::slice::from_ref(id),
            Self::Many(ids) => ids,
        }
    }
}

/// Parsed frontmatter of an article.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Article title
    pub title: String,

    /// Short summary used in listings and feeds
    pub description: String,

    /// Author id(s)
    pub author: Authors,

    /// Topic tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Publication date. Absent for drafts.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<DateTime<Utc>>,

    /// `false` marks a draft
    #[serde(default)]
    pub publish: Option<bool>,

    /// Hero image path under `/hero/`
    #[serde(default)]
    pub hero: Option<String>,
}

impl Frontmatter {
    /// Convert a raw frontmatter mapping into typed frontmatter.
    pub fn from_mapping(mapping: Mapping) -> Result<Self, FrontmatterError> {
        serde_yaml::from_value(Value::Mapping(mapping))
            .map_err(|e| FrontmatterError::Schema(e.to_string()))
    }

    /// Whether the article is explicitly unpublished.
    pub fn is_draft(&self) -> bool {
        self.publish == Some(false)
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{}`", raw))),
    }
}

/// Parse a frontmatter date.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM[:SS]` (with a space or `T`)
/// and plain `YYYY-MM-DD`, which resolves to midnight UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Extract the raw frontmatter mapping from a markdown source.
///
/// Returns the mapping and the remaining content after the frontmatter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Mapping>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let mapping = if yaml_content.is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
        {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            _ => {
                return Err(FrontmatterError::InvalidYaml(
                    "frontmatter must be a mapping".to_string(),
                ))
            }
        }
    };

    Ok((Some(mapping), remaining.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),

    #[error("Frontmatter does not match the article schema: {0}")]
    Schema(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_valid_frontmatter() {
        let source = r#"---
title: Optional chaining
description: When ?. helps and when it hides bugs
author: vchet
tags: [typescript]
date: 2025-03-14
---

# Optional chaining
"#;

        let (mapping, content) = extract_frontmatter(source).unwrap();
        let fm = Frontmatter::from_mapping(mapping.unwrap()).unwrap();

        assert_eq!(fm.title, "Optional chaining");
        assert_eq!(fm.author.ids(), ["vchet".to_string()]);
        assert_eq!(fm.tags, vec!["typescript".to_string()]);
        assert_eq!(
            fm.date,
            Some(Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap())
        );
        assert!(!fm.is_draft());
        assert!(content.starts_with("# Optional chaining"));
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter here.";

        let (mapping, content) = extract_frontmatter(source).unwrap();

        assert!(mapping.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn empty_block_is_empty_mapping() {
        let (mapping, content) = extract_frontmatter("---\n---\nBody").unwrap();

        assert_eq!(mapping, Some(Mapping::new()));
        assert_eq!(content, "Body");
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let result = extract_frontmatter("---\ntitle: Test\n# No closing");

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let result = extract_frontmatter("---\ntitle: [invalid yaml\n---\n");

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }

    #[test]
    fn errors_on_scalar_frontmatter() {
        let result = extract_frontmatter("---\njust a string\n---\n");

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }

    #[test]
    fn parses_draft_with_author_list() {
        let (mapping, _) = extract_frontmatter(
            "---\ntitle: Draft\ndescription: Soon\nauthor: [vchet, rudnovd]\ntags: [vue]\npublish: false\n---\n",
        )
        .unwrap();
        let fm = Frontmatter::from_mapping(mapping.unwrap()).unwrap();

        assert!(fm.is_draft());
        assert_eq!(fm.date, None);
        assert_eq!(fm.author.ids().len(), 2);
    }

    #[test]
    fn rejects_unparseable_date() {
        let (mapping, _) = extract_frontmatter(
            "---\ntitle: T\ndescription: D\nauthor: vchet\ndate: yesterday\n---\n",
        )
        .unwrap();

        let result = Frontmatter::from_mapping(mapping.unwrap());

        assert!(matches!(result, Err(FrontmatterError::Schema(_))));
    }

    #[test]
    fn parses_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2025, 1, 2, 18, 30, 0).unwrap();

        assert_eq!(parse_date("2025-01-02"), Some(midnight));
        assert_eq!(parse_date("2025-01-02 18:30"), Some(evening));
        assert_eq!(parse_date("2025-01-02T18:30:00"), Some(evening));
        assert_eq!(parse_date("2025-01-02T21:30:00+03:00"), Some(evening));
        assert_eq!(parse_date("02.01.2025"), None);
        assert_eq!(parse_date("2025-13-01"), None);
    }
}
