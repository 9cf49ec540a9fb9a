//! folio: content indexer for a markdown personal site
//!
//! Posts live as markdown/MDX files with YAML front-matter. This crate reads
//! them, validates their metadata, and hands the rendering layer an ordered,
//! filterable list of posts plus the author bios that go with them.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;

use anyhow::Result;
use chrono_tz::Tz;
use std::path::{Path, PathBuf};

pub use error::IndexError;

/// Name of the configuration file at the site root
pub const CONFIG_FILE: &str = "site.yml";

/// A site on disk
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Post directory
    pub content_dir: PathBuf,
    /// Author bio directory
    pub authors_dir: PathBuf,
    /// Timezone for offset-less dates
    pub tz: Tz,
}

impl Site {
    /// Open a site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Open a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Result<Self> {
        config.validate()?;
        let base_dir = base_dir.as_ref().to_path_buf();
        let tz = config.tz()?;

        Ok(Self {
            content_dir: base_dir.join(&config.content_dir),
            authors_dir: base_dir.join(&config.authors_dir),
            config,
            base_dir,
            tz,
        })
    }

    /// Indexer over the post directory
    pub fn posts(&self) -> content::ContentIndex<content::FsSource> {
        let source = content::FsSource::new(&self.content_dir, &self.config.extensions);
        content::ContentIndex::new(source, self.tz)
    }

    /// Indexer over the author directory
    pub fn authors(&self) -> content::AuthorIndex<content::FsSource> {
        let source = content::FsSource::new(&self.authors_dir, &self.config.extensions);
        content::AuthorIndex::new(source)
    }

    /// Markdown renderer configured for this site
    pub fn renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::from_config(&self.config.highlight)
    }
}
