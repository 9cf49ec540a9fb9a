//! Post model

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::date::parse_date;
use super::frontmatter::FrontMatter;
use super::source::RawRecord;
use super::{markdown, slug};
use crate::error::{IndexError, Result};

/// Author assigned to posts whose front-matter names none
pub const DEFAULT_AUTHOR: &str = "default";

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Path-derived identifier, unique across the site
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Last modified date
    pub lastmod: Option<DateTime<FixedOffset>>,

    /// Post tags, duplicates removed
    pub tags: Vec<String>,

    /// Unpublished posts never reach public listings
    pub draft: bool,

    /// Short description for listings
    pub summary: Option<String>,

    /// Author slugs
    pub authors: Vec<String>,

    /// Layout hint for the rendering layer
    pub layout: Option<String>,

    /// Raw markdown body
    pub body: String,

    /// Source path relative to the content root
    pub source: String,

    /// Custom front-matter fields
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Validate a raw record and build a post from it
    pub fn from_record(record: &RawRecord, tz: Tz) -> Result<Self> {
        let path = record.path.as_str();
        let (fm, body) =
            FrontMatter::parse(&record.text).map_err(|e| IndexError::malformed(path, e))?;

        let slug = slug::from_path(path)
            .ok_or_else(|| IndexError::malformed(path, "path does not yield a slug"))?;

        let title = fm
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| IndexError::malformed(path, "missing required field 'title'"))?;

        let raw_date = fm
            .date
            .ok_or_else(|| IndexError::malformed(path, "missing required field 'date'"))?;
        let date = parse_date(&raw_date, tz).ok_or_else(|| {
            IndexError::malformed(path, format!("unparsable 'date': {:?}", raw_date))
        })?;

        let lastmod = match fm.lastmod {
            Some(raw) => Some(parse_date(&raw, tz).ok_or_else(|| {
                IndexError::malformed(path, format!("unparsable 'lastmod': {:?}", raw))
            })?),
            None => None,
        };

        let mut authors = dedup(fm.authors);
        if authors.is_empty() {
            authors.push(DEFAULT_AUTHOR.to_string());
        }

        Ok(Self {
            slug,
            title,
            date,
            lastmod,
            tags: dedup(fm.tags),
            draft: fm.draft,
            summary: fm.summary,
            authors,
            layout: fm.layout,
            body: body.to_string(),
            source: record.path.clone(),
            extra: fm.extra,
        })
    }

    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }

    /// Listing order: newest first, slug ascending on equal dates
    pub fn listing_order(a: &Post, b: &Post) -> Ordering {
        b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug))
    }

    /// Estimated reading time in whole minutes
    pub fn reading_time(&self) -> usize {
        markdown::reading_time(&self.body)
    }
}

/// Drop repeated and blank entries, keeping first occurrences
fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim().to_string();
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, text: &str) -> RawRecord {
        RawRecord::new(path, text)
    }

    #[test]
    fn test_from_record() {
        let post = Post::from_record(
            &record(
                "2024/Hello World.md",
                "---\ntitle: Hello\ndate: 2024-01-15\ntags: [rust, Rust, rust, ' ']\nlastmod: 2024-02-01\n---\n# Hi\n",
            ),
            chrono_tz::UTC,
        )
        .unwrap();

        assert_eq!(post.slug, "2024/hello-world");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.date.to_rfc3339(), "2024-01-15T00:00:00+00:00");
        assert!(post.lastmod.is_some());
        assert_eq!(post.tags, vec!["rust", "Rust"]);
        assert_eq!(post.authors, vec![DEFAULT_AUTHOR]);
        assert!(!post.draft);
        assert_eq!(post.body, "# Hi\n");
        assert_eq!(post.source, "2024/Hello World.md");
    }

    #[test]
    fn test_missing_title_or_date() {
        let err = Post::from_record(&record("a.md", "---\ndate: 2024-01-15\n---\n"), chrono_tz::UTC)
            .unwrap_err();
        assert!(err.to_string().contains("title"));

        let err = Post::from_record(&record("a.md", "---\ntitle: A\n---\n"), chrono_tz::UTC)
            .unwrap_err();
        assert!(matches!(err, IndexError::MalformedMetadata { .. }));
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = Post::from_record(
            &record("a.md", "---\ntitle: '  '\ndate: 2024-01-15\n---\n"),
            chrono_tz::UTC,
        )
        .unwrap_err();
        assert!(matches!(err, IndexError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_unparsable_dates() {
        let err = Post::from_record(
            &record("a.md", "---\ntitle: A\ndate: someday\n---\n"),
            chrono_tz::UTC,
        )
        .unwrap_err();
        assert!(matches!(err, IndexError::MalformedMetadata { ref path, .. } if path == "a.md"));

        let err = Post::from_record(
            &record("a.md", "---\ntitle: A\ndate: 2024-01-01\nlastmod: later\n---\n"),
            chrono_tz::UTC,
        )
        .unwrap_err();
        assert!(err.to_string().contains("lastmod"));
    }

    #[test]
    fn test_has_tag_case_insensitive() {
        let post = Post::from_record(
            &record("a.md", "---\ntitle: A\ndate: 2024-01-01\ntags: [Next.js, Rust]\n---\n"),
            chrono_tz::UTC,
        )
        .unwrap();
        assert!(post.has_tag("next.js"));
        assert!(post.has_tag("RUST"));
        assert!(!post.has_tag("go"));
    }
}
