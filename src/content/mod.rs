//! Content module - posts, authors, and the indexer over them

mod author;
mod catalog;
pub mod date;
mod frontmatter;
mod index;
pub mod markdown;
mod post;
pub mod slug;
mod source;

pub use author::{Author, AuthorIndex};
pub use catalog::{Catalog, Neighbours, PostPage, TagSummary};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use index::ContentIndex;
pub use markdown::MarkdownRenderer;
pub use post::{Post, DEFAULT_AUTHOR};
pub use source::{ContentSource, FsSource, MemorySource, RawRecord};
