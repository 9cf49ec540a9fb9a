//! Site configuration (site.yml)

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::IndexError;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: String,
    pub language: String,
    pub timezone: String,

    // Content
    pub content_dir: String,
    pub authors_dir: String,
    pub extensions: Vec<String>,

    // Listing
    pub per_page: usize,
    pub date_format: String,

    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields for the rendering layer
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            author: "default".to_string(),
            description: String::new(),
            url: "http://localhost".to_string(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),

            content_dir: "data/blog".to_string(),
            authors_dir: "data/authors".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string(), "markdown".to_string()],

            per_page: 10,
            date_format: "YYYY-MM-DD".to_string(),

            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde alone cannot reject
    pub fn validate(&self) -> std::result::Result<(), IndexError> {
        self.tz()?;
        if self.per_page == 0 {
            return Err(IndexError::Config("per_page must be at least 1".to_string()));
        }
        if self.extensions.is_empty() {
            return Err(IndexError::Config(
                "extensions must name at least one file extension".to_string(),
            ));
        }
        Ok(())
    }

    /// Timezone used for front-matter dates that carry no offset
    pub fn tz(&self) -> std::result::Result<Tz, IndexError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| IndexError::Config(format!("timezone '{}': {}", self.timezone, e)))
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "data/blog");
        assert_eq!(config.per_page, 10);
        assert_eq!(config.tz().unwrap(), chrono_tz::UTC);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Notes
author: jane
timezone: Europe/Berlin
per_page: 5
highlight:
  line_number: true
comments: giscus
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.author, "jane");
        assert_eq!(config.per_page, 5);
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::Berlin);
        assert!(config.extra.contains_key("comments"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = SiteConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(IndexError::Config(_))));

        let config = SiteConfig {
            per_page: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(IndexError::Config(_))));
    }
}
