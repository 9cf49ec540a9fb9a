//! Front-matter parsing
//!
//! A record starts with a metadata block, either YAML between `---` lines or
//! JSON (`;;;`-delimited, or a bare leading object). The block is decoded
//! into a typed schema; anything that does not fit the schema is an error,
//! never silently folded into the body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Why a metadata block could not be read
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("no front-matter block")]
    Missing,

    #[error("front-matter block is not terminated")]
    Unterminated,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),
}

/// Custom deserializer that handles both a single string and a list of strings
pub(crate) fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a blog post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub lastmod: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub draft: bool,
    pub summary: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub authors: Vec<String>,
    pub layout: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse post front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        parse(content)
    }
}

/// Metadata block located at the top of a record
enum Block<'a> {
    Yaml(&'a str),
    Json(&'a str),
}

/// Split a record and decode its metadata block into `T`
pub fn parse<T: DeserializeOwned>(content: &str) -> Result<(T, &str), FrontMatterError> {
    let (block, body) = split(content)?;
    let meta = match block {
        Block::Yaml(yaml) if yaml.trim().is_empty() => serde_yaml::from_str("{}")?,
        Block::Yaml(yaml) => serde_yaml::from_str(yaml)?,
        Block::Json(json) => serde_json::from_str(json)?,
    };
    Ok((meta, body))
}

fn split(content: &str) -> Result<(Block<'_>, &str), FrontMatterError> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    if let Some(rest) = content.strip_prefix("---") {
        return split_yaml(rest);
    }
    if let Some(rest) = content.strip_prefix(";;;") {
        let end = rest.find(";;;").ok_or(FrontMatterError::Unterminated)?;
        let body = rest[end + 3..].trim_start_matches(['\n', '\r']);
        return Ok((Block::Json(&rest[..end]), body));
    }
    if content.starts_with('{') {
        let end = json_object_end(content).ok_or(FrontMatterError::Unterminated)?;
        let body = content[end..].trim_start_matches(['\n', '\r']);
        return Ok((Block::Json(&content[..end]), body));
    }

    Err(FrontMatterError::Missing)
}

fn split_yaml(rest: &str) -> Result<(Block<'_>, &str), FrontMatterError> {
    // The opening fence must stand alone on its line
    let rest = match rest.find('\n') {
        Some(nl) if rest[..nl].trim().is_empty() => &rest[nl + 1..],
        None if rest.trim().is_empty() => return Err(FrontMatterError::Unterminated),
        _ => return Err(FrontMatterError::Missing),
    };

    // The closing fence is a line holding nothing but `---`
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim() == "---" {
            let body = &rest[offset + line.len()..];
            return Ok((Block::Yaml(&rest[..offset]), body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Byte offset just past the object that opens `content`
fn json_object_end(content: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in content.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
