//! Error types for content indexing

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading and querying site content
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Malformed metadata in {path}: {reason}")]
    MalformedMetadata { path: String, reason: String },

    #[error("{what} not found: {key}")]
    NotFound { what: &'static str, key: String },

    #[error("Duplicate slug '{slug}' ({first} and {second})")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl IndexError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl ToString) -> Self {
        IndexError::MalformedMetadata {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        IndexError::NotFound {
            what,
            key: key.into(),
        }
    }

    /// True for lookups that missed, as opposed to broken content
    pub fn is_not_found(&self) -> bool {
        matches!(self, IndexError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
