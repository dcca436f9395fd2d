//! Author directory.

use std::collections::BTreeMap;

use jsfk_content::Authors;
use serde::{Deserialize, Serialize};

/// An article author.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Author {
    /// Id referenced from frontmatter `author`
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub url: String,
}

/// Authors keyed by id.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AuthorDirectory {
    authors: BTreeMap<String, Author>,
}

impl AuthorDirectory {
    pub fn new(authors: impl IntoIterator<Item = Author>) -> Self {
        Self {
            authors: authors.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Author> {
        self.authors.get(id)
    }

    /// All known author ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.authors.keys().map(String::as_str)
    }

    /// Resolve frontmatter author ids, skipping unknown ones.
    pub fn resolve(&self, authors: &Authors) -> Vec<&Author> {
        authors.ids().iter().filter_map(|id| self.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn resolves_known_authors() {
        let directory = AuthorDirectory::new(SiteConfig::default().authors);

        let resolved = directory.resolve(&Authors::Many(vec![
            "rudnovd".to_string(),
            "ghost".to_string(),
        ]));

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "rudnovd");
        assert_eq!(directory.ids().collect::<Vec<_>>(), vec!["rudnovd", "vchet"]);
    }
}
