//! Markdown article parsing for the JS F/k blog.
//!
//! This crate extracts YAML frontmatter from articles, converts it into typed
//! metadata, validates it against the blog's schema and renders article bodies
//! to HTML.

pub mod frontmatter;
pub mod parser;
pub mod validate;

pub use frontmatter::{extract_frontmatter, parse_date, Authors, Frontmatter, FrontmatterError};
pub use parser::{parse_article, render_html, title_from_body, ParseError, ParsedDoc};
pub use validate::{Validator, Violation, HERO_PATTERN};
