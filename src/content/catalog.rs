//! Catalog - an immutable snapshot of the published posts

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::post::Post;
use crate::error::{IndexError, Result};

/// A tag with the number of published posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    /// Spelling used by the newest post carrying the tag
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// One page of a paginated listing
#[derive(Debug, Clone, Serialize)]
pub struct PostPage<'a> {
    pub posts: &'a [Post],
    /// 1-based page number
    pub current: usize,
    pub total_pages: usize,
    pub per_page: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Posts adjacent to a given post in listing order
#[derive(Debug, Clone, Copy)]
pub struct Neighbours<'a> {
    pub newer: Option<&'a Post>,
    pub older: Option<&'a Post>,
}

/// Published posts in listing order, read once
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    posts: Vec<Post>,
}

impl Catalog {
    /// Wrap posts that are already filtered and sorted
    pub(crate) fn from_listing(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn by_slug(&self, slug: &str) -> Result<&Post> {
        self.posts
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| IndexError::not_found("post", slug))
    }

    pub fn by_tag(&self, tag: &str) -> Result<Vec<&Post>> {
        let tagged: Vec<&Post> = self.posts.iter().filter(|p| p.has_tag(tag)).collect();
        if tagged.is_empty() {
            return Err(IndexError::not_found("tag", tag));
        }
        Ok(tagged)
    }

    /// Tags by descending count, then name
    pub fn tags(&self) -> Vec<TagSummary> {
        let mut by_key: HashMap<String, TagSummary> = HashMap::new();

        for post in &self.posts {
            // Spellings differing only in case count once per post
            let mut counted: HashSet<String> = HashSet::new();
            for tag in &post.tags {
                if !counted.insert(tag.to_lowercase()) {
                    continue;
                }
                by_key
                    .entry(tag.to_lowercase())
                    .or_insert_with(|| TagSummary {
                        name: tag.clone(),
                        slug: slug::slugify(tag),
                        count: 0,
                    })
                    .count += 1;
            }
        }

        let mut tags: Vec<(String, TagSummary)> = by_key.into_iter().collect();
        tags.sort_by(|(ka, a), (kb, b)| b.count.cmp(&a.count).then_with(|| ka.cmp(kb)));
        tags.into_iter().map(|(_, t)| t).collect()
    }

    /// Page `n` (1-based) of the listing
    pub fn page(&self, n: usize, per_page: usize) -> Result<PostPage<'_>> {
        if per_page == 0 {
            return Err(IndexError::Config("per_page must be at least 1".to_string()));
        }

        let total_pages = self.posts.len().div_ceil(per_page).max(1);
        if n == 0 || n > total_pages {
            return Err(IndexError::not_found("page", n.to_string()));
        }

        let start = (n - 1) * per_page;
        let end = (start + per_page).min(self.posts.len());

        Ok(PostPage {
            posts: &self.posts[start..end],
            current: n,
            total_pages,
            per_page,
            has_prev: n > 1,
            has_next: n < total_pages,
        })
    }

    pub fn neighbours(&self, slug: &str) -> Result<Neighbours<'_>> {
        let pos = self
            .posts
            .iter()
            .position(|p| p.slug == slug)
            .ok_or_else(|| IndexError::not_found("post", slug))?;

        Ok(Neighbours {
            newer: pos.checked_sub(1).map(|i| &self.posts[i]),
            older: self.posts.get(pos + 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentIndex, MemorySource};

    fn catalog(entries: &[(&str, &str, &str)]) -> Catalog {
        let mut source = MemorySource::new();
        for (name, date, tags) in entries {
            source.insert(
                format!("{}.md", name),
                format!("---\ntitle: {}\ndate: {}\ntags: [{}]\n---\n", name, date, tags),
            );
        }
        ContentIndex::new(source, chrono_tz::UTC).catalog().unwrap()
    }

    #[test]
    fn test_lookup() {
        let catalog = catalog(&[("a", "2023-01-01", "x"), ("b", "2023-01-02", "X, y")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.by_slug("a").unwrap().title, "a");
        assert!(catalog.by_slug("c").unwrap_err().is_not_found());

        let tagged: Vec<&str> = catalog
            .by_tag("x")
            .unwrap()
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(tagged, vec!["b", "a"]);
        assert!(catalog.by_tag("z").is_err());
    }

    #[test]
    fn test_tag_summaries() {
        let catalog = catalog(&[
            ("a", "2023-01-01", "rust"),
            ("b", "2023-01-02", "Rust, Next.js"),
            ("c", "2023-01-03", "go"),
        ]);

        let tags = catalog.tags();
        assert_eq!(
            tags[0],
            TagSummary {
                name: "Rust".to_string(),
                slug: "rust".to_string(),
                count: 2
            }
        );
        let rest: Vec<&str> = tags[1..].iter().map(|t| t.name.as_str()).collect();
        assert_eq!(rest, vec!["go", "Next.js"]);
        assert_eq!(tags[2].slug, "next-js");
    }

    #[test]
    fn test_tag_case_variants_count_once_per_post() {
        let catalog = catalog(&[("a", "2023-01-01", "rust, Rust"), ("b", "2023-01-02", "RUST")]);

        let tags = catalog.tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "RUST");
        assert_eq!(tags[0].count, 2);
        assert_eq!(tags[0].count, catalog.by_tag("rust").unwrap().len());

        let single = self::catalog(&[("only", "2023-01-01", "rust, Rust")]);
        assert_eq!(single.tags()[0].count, 1);
        assert_eq!(single.by_tag("rust").unwrap().len(), 1);
    }

    #[test]
    fn test_page_serializes_navigation() {
        let catalog = catalog(&[("a", "2023-01-01", ""), ("b", "2023-01-02", "")]);
        let page = serde_json::to_value(catalog.page(1, 1).unwrap()).unwrap();
        assert_eq!(page["has_prev"], false);
        assert_eq!(page["has_next"], true);
        assert_eq!(page["posts"][0]["slug"], "b");

        let all = serde_json::to_value(&catalog).unwrap();
        assert_eq!(all["posts"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_pagination_covers_every_post_once() {
        let catalog = catalog(&[
            ("a", "2023-01-01", ""),
            ("b", "2023-01-02", ""),
            ("c", "2023-01-03", ""),
            ("d", "2023-01-04", ""),
            ("e", "2023-01-05", ""),
        ]);

        let first = catalog.page(1, 2).unwrap();
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_prev);
        assert!(first.has_next);

        let mut seen = Vec::new();
        for n in 1..=3 {
            seen.extend(catalog.page(n, 2).unwrap().posts.iter().map(|p| p.slug.clone()));
        }
        assert_eq!(seen, vec!["e", "d", "c", "b", "a"]);

        let last = catalog.page(3, 2).unwrap();
        assert_eq!(last.posts.len(), 1);
        assert!(!last.has_next);
        assert!(last.has_prev);

        assert!(catalog.page(4, 2).unwrap_err().is_not_found());
        assert!(catalog.page(0, 2).unwrap_err().is_not_found());
        assert!(matches!(catalog.page(1, 0), Err(IndexError::Config(_))));
    }

    #[test]
    fn test_catalog_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }

    #[test]
    fn test_empty_catalog_has_one_page() {
        let catalog = Catalog::default();
        let page = catalog.page(1, 10).unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_neighbours() {
        let catalog = catalog(&[
            ("a", "2023-01-01", ""),
            ("b", "2023-01-02", ""),
            ("c", "2023-01-03", ""),
        ]);

        let n = catalog.neighbours("b").unwrap();
        assert_eq!(n.newer.map(|p| p.slug.as_str()), Some("c"));
        assert_eq!(n.older.map(|p| p.slug.as_str()), Some("a"));

        let n = catalog.neighbours("c").unwrap();
        assert!(n.newer.is_none());
        assert!(catalog.neighbours("zz").is_err());
    }
}
