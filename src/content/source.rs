//! Content sources - where raw records come from

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::{IndexError, Result};

/// A raw content record: front-matter plus body, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Path relative to the content root, `/`-separated
    pub path: String,
    /// Full file text
    pub text: String,
}

impl RawRecord {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Anything that can enumerate content records
pub trait ContentSource {
    /// Read every record. Order is by path.
    fn records(&self) -> Result<Vec<RawRecord>>;
}

/// Markdown files under a directory
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FsSource {
    pub fn new<P: AsRef<Path>>(root: P, extensions: &[String]) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|ext| ext.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

impl ContentSource for FsSource {
    fn records(&self) -> Result<Vec<RawRecord>> {
        if !self.root.exists() {
            tracing::warn!("Content directory {:?} does not exist", self.root);
            return Ok(Vec::new());
        }

        let mut records = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_content_file(path) {
                continue;
            }

            let text = fs::read_to_string(path).map_err(|source| IndexError::Io {
                path: path.to_path_buf(),
                source,
            })?;

            let relative = path
                .strip_prefix(&self.root)
                .unwrap_or(path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            tracing::debug!("Read record {}", relative);
            records.push(RawRecord::new(relative, text));
        }

        Ok(records)
    }
}

/// Records held in memory, for tests and for embedding content in a binary
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<RawRecord>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, builder style
    pub fn with(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.records.push(RawRecord::new(path, text));
    }
}

impl ContentSource for MemorySource {
    fn records(&self) -> Result<Vec<RawRecord>> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(records)
    }
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn records(&self) -> Result<Vec<RawRecord>> {
        (**self).records()
    }
}
