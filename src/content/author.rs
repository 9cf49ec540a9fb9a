//! Author bios

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::frontmatter;
use super::slug;
use super::source::{ContentSource, RawRecord};
use crate::error::{IndexError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AuthorMeta {
    name: Option<String>,
    avatar: Option<String>,
    occupation: Option<String>,
    company: Option<String>,
    email: Option<String>,
    twitter: Option<String>,
    github: Option<String>,
}

/// An author bio page
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub slug: String,
    pub name: String,
    pub avatar: Option<String>,
    pub occupation: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    /// Raw markdown bio
    pub body: String,
}

impl Author {
    pub fn from_record(record: &RawRecord) -> Result<Self> {
        let path = record.path.as_str();
        let (meta, body) = frontmatter::parse::<AuthorMeta>(&record.text)
            .map_err(|e| IndexError::malformed(path, e))?;

        let slug = slug::from_path(path)
            .ok_or_else(|| IndexError::malformed(path, "path does not yield a slug"))?;
        let name = meta
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| IndexError::malformed(path, "missing required field 'name'"))?;

        Ok(Self {
            slug,
            name,
            avatar: meta.avatar,
            occupation: meta.occupation,
            company: meta.company,
            email: meta.email,
            twitter: meta.twitter,
            github: meta.github,
            body: body.to_string(),
        })
    }
}

/// Author lookup over a content source
pub struct AuthorIndex<S> {
    source: S,
}

impl<S: ContentSource> AuthorIndex<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// All authors, sorted by slug
    pub fn load_all(&self) -> Result<Vec<Author>> {
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut authors = Vec::new();

        for record in self.source.records()? {
            let author = Author::from_record(&record)?;
            if let Some(first) = seen.insert(author.slug.clone(), record.path.clone()) {
                return Err(IndexError::DuplicateSlug {
                    slug: author.slug,
                    first,
                    second: record.path,
                });
            }
            authors.push(author);
        }

        authors.sort_by(|a, b| a.slug.cmp(&b.slug));
        tracing::debug!("Loaded {} authors", authors.len());
        Ok(authors)
    }

    pub fn by_slug(&self, slug: &str) -> Result<Author> {
        self.load_all()?
            .into_iter()
            .find(|a| a.slug == slug)
            .ok_or_else(|| IndexError::not_found("author", slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemorySource;

    #[test]
    fn test_load_authors() {
        let source = MemorySource::new()
            .with("default.md", "---\nname: Jane Doe\ngithub: https://github.com/jane\n---\nI write things.\n")
            .with("guest.md", "---\nname: Sam\n---\n");
        let index = AuthorIndex::new(source);

        let authors = index.load_all().unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].slug, "default");
        assert_eq!(authors[0].body, "I write things.\n");

        let jane = index.by_slug("default").unwrap();
        assert_eq!(jane.name, "Jane Doe");
        assert_eq!(jane.github.as_deref(), Some("https://github.com/jane"));
    }

    #[test]
    fn test_missing_name_and_unknown_slug() {
        let index = AuthorIndex::new(MemorySource::new().with("x.md", "---\navatar: a.png\n---\n"));
        assert!(matches!(
            index.load_all(),
            Err(IndexError::MalformedMetadata { .. })
        ));

        let index = AuthorIndex::new(MemorySource::new().with("x.md", "---\nname: X\n---\n"));
        assert!(index.by_slug("y").unwrap_err().is_not_found());
    }
}
