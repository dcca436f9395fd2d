//! Markdown article parser.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use serde_yaml::Mapping;

use crate::frontmatter::{extract_frontmatter, FrontmatterError};

/// A markdown article split into frontmatter and body.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Raw frontmatter mapping (if present)
    pub frontmatter: Option<Mapping>,

    /// Markdown content (without frontmatter)
    pub content: String,
}

/// Errors that can occur when parsing an article.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Parse a markdown article into its frontmatter and body.
pub fn parse_article(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
    })
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Render markdown to HTML.
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

/// Text of the first heading in the body, if any.
pub fn title_from_body(markdown: &str) -> Option<String> {
    let mut heading: Option<String> = None;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Heading { .. }) => heading = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(ref mut title) = heading {
                    title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(title) = heading.take() {
                    let title = title.trim().to_string();
                    if !title.is_empty() {
                        return Some(title);
                    }
                }
            }
            _ => {}
        }
    }

    None
}
