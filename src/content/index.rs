//! Content indexer - turns raw records into ordered posts

use chrono_tz::Tz;
use std::collections::HashMap;

use super::catalog::Catalog;
use super::post::Post;
use super::source::ContentSource;
use crate::error::{IndexError, Result};

/// Reads posts from a content source and answers listing queries.
///
/// Every query re-reads the source. Use [`ContentIndex::catalog`] to read
/// once and query a snapshot.
pub struct ContentIndex<S> {
    source: S,
    tz: Tz,
}

impl<S: ContentSource> ContentIndex<S> {
    /// Create an indexer; dates without an offset are read in `tz`
    pub fn new(source: S, tz: Tz) -> Self {
        Self { source, tz }
    }

    /// Parse every record, drafts included, enforcing unique slugs
    fn load_posts(&self) -> Result<Vec<Post>> {
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut posts = Vec::new();

        for record in self.source.records()? {
            let post = Post::from_record(&record, self.tz)?;
            tracing::debug!("Parsed {} as '{}'", record.path, post.slug);

            if let Some(first) = seen.insert(post.slug.clone(), record.path.clone()) {
                return Err(IndexError::DuplicateSlug {
                    slug: post.slug,
                    first,
                    second: record.path,
                });
            }
            posts.push(post);
        }

        Ok(posts)
    }

    /// Published and draft posts from a single read, each in listing order
    pub(crate) fn load_partitioned(&self) -> Result<(Vec<Post>, Vec<Post>)> {
        let (mut published, mut drafts): (Vec<Post>, Vec<Post>) =
            self.load_posts()?.into_iter().partition(|p| !p.draft);
        published.sort_by(Post::listing_order);
        drafts.sort_by(Post::listing_order);
        Ok((published, drafts))
    }

    /// All published posts, newest first
    pub fn load_all(&self) -> Result<Vec<Post>> {
        let (published, drafts) = self.load_partitioned()?;
        tracing::info!(
            "Loaded {} posts ({} drafts skipped)",
            published.len(),
            drafts.len()
        );
        Ok(published)
    }

    /// Draft posts only, in listing order
    pub fn load_drafts(&self) -> Result<Vec<Post>> {
        Ok(self.load_partitioned()?.1)
    }

    /// Published posts carrying `tag`, compared case-insensitively
    pub fn by_tag(&self, tag: &str) -> Result<Vec<Post>> {
        let tagged: Vec<Post> = self
            .load_all()?
            .into_iter()
            .filter(|p| p.has_tag(tag))
            .collect();

        if tagged.is_empty() {
            return Err(IndexError::not_found("tag", tag));
        }
        Ok(tagged)
    }

    /// The published post with exactly this slug
    pub fn by_slug(&self, slug: &str) -> Result<Post> {
        self.load_all()?
            .into_iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| IndexError::not_found("post", slug))
    }

    /// Read the source once and keep the result for repeated queries
    pub fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::from_listing(self.load_all()?))
    }
}
