//! Frontmatter shape validation.
//!
//! Works on the raw YAML mapping rather than [`crate::Frontmatter`] so that every
//! problem in a file is reported at once instead of stopping at the first
//! deserialization error.

use std::collections::HashSet;

use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::frontmatter::{extract_frontmatter, parse_date};

/// Hero images must live under `/hero/` and use a web image format.
pub const HERO_PATTERN: &str = r"^/hero/.+\.(png|jpe?g|webp|svg|gif)$";

/// A single frontmatter rule violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("missing frontmatter block")]
    MissingFrontmatter,

    #[error("malformed frontmatter: {message}")]
    Malformed { message: String },

    #[error("`{field}` is required")]
    Missing { field: &'static str },

    #[error("`{field}` must be a string")]
    NotAString { field: &'static str },

    #[error("`tags` must be a non-empty list")]
    EmptyTags,

    #[error("`tags[{index}]` must be a string")]
    TagNotAString { index: usize },

    #[error("`author` must be an author id or a non-empty list of author ids")]
    InvalidAuthor,

    #[error("unknown author `{id}`")]
    UnknownAuthor { id: String },

    #[error("`hero` must be an image path under /hero/, got `{value}`")]
    InvalidHero { value: String },

    #[error("`publish` may only be set to false")]
    PublishNotFalse,

    #[error("unpublished articles must not have a `date`")]
    DateWithPublish,

    #[error("`date` is not a valid date: `{value}`")]
    InvalidDate { value: String },
}

/// Validates article frontmatter against the blog's schema.
#[derive(Debug, Clone)]
pub struct Validator {
    known_authors: HashSet<String>,
    hero: Regex,
}

impl Validator {
    /// Create a validator that accepts the given author ids.
    pub fn new<I, S>(known_authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_authors: known_authors.into_iter().map(Into::into).collect(),
            // The pattern is a compile-time constant.
            hero: Regex::new(HERO_PATTERN).expect("hero pattern is valid"),
        }
    }

    /// Validate the frontmatter of a markdown source.
    pub fn validate_source(&self, source: &str) -> Vec<Violation> {
        match extract_frontmatter(source) {
            Ok((frontmatter, _)) => self.validate(frontmatter.as_ref()),
            Err(e) => vec![Violation::Malformed {
                message: e.to_string(),
            }],
        }
    }

    /// Validate a frontmatter mapping, returning every violation found.
    pub fn validate(&self, frontmatter: Option<&Mapping>) -> Vec<Violation> {
        let Some(fm) = frontmatter else {
            return vec![Violation::MissingFrontmatter];
        };

        let mut violations = Vec::new();

        for field in ["title", "description"] {
            match fm.get(field) {
                None => violations.push(Violation::Missing { field }),
                Some(Value::String(_)) => {}
                Some(_) => violations.push(Violation::NotAString { field }),
            }
        }

        self.check_tags(fm, &mut violations);
        self.check_author(fm, &mut violations);

        if let Some(hero) = fm.get("hero") {
            match hero {
                Value::String(path) if self.hero.is_match(path) => {}
                other => violations.push(Violation::InvalidHero {
                    value: scalar_to_string(other),
                }),
            }
        }

        match fm.get("publish") {
            Some(publish) => {
                if publish != &Value::Bool(false) {
                    violations.push(Violation::PublishNotFalse);
                }
                if fm.get("date").is_some() {
                    violations.push(Violation::DateWithPublish);
                }
            }
            None => match fm.get("date") {
                None => violations.push(Violation::Missing { field: "date" }),
                Some(Value::String(raw)) if parse_date(raw).is_some() => {}
                Some(other) => violations.push(Violation::InvalidDate {
                    value: scalar_to_string(other),
                }),
            },
        }

        violations
    }

    fn check_tags(&self, fm: &Mapping, violations: &mut Vec<Violation>) {
        match fm.get("tags") {
            Some(Value::Sequence(tags)) if !tags.is_empty() => {
                for (index, tag) in tags.iter().enumerate() {
                    if !tag.is_string() {
                        violations.push(Violation::TagNotAString { index });
                    }
                }
            }
            _ => violations.push(Violation::EmptyTags),
        }
    }

    fn check_author(&self, fm: &Mapping, violations: &mut Vec<Violation>) {
        let ids: Vec<&str> = match fm.get("author") {
            None => {
                violations.push(Violation::Missing { field: "author" });
                return;
            }
            Some(Value::String(id)) => vec![id.as_str()],
            Some(Value::Sequence(items)) if !items.is_empty() => {
                let ids: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                if ids.len() != items.len() {
                    violations.push(Violation::InvalidAuthor);
                    return;
                }
                ids
            }
            Some(_) => {
                violations.push(Violation::InvalidAuthor);
                return;
            }
        };

        for id in ids {
            if !self.known_authors.contains(id) {
                violations.push(Violation::UnknownAuthor { id: id.to_string() });
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_yaml::to_string(value)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
