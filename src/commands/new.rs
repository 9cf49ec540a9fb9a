//! Create a new post

use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::Site;

#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    tags: &'a [String],
    draft: bool,
    summary: &'a str,
}

/// Write a new post file dated `now` and return its path
pub fn create_post(
    site: &Site,
    title: &str,
    tags: &[String],
    draft: bool,
    now: DateTime<Tz>,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    fs::create_dir_all(&site.content_dir)?;
    let file_path = site.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold = Scaffold {
        title,
        date: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        tags,
        draft,
        summary: "",
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&scaffold)?);

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(
    site: &Site,
    title: &str,
    tags: &[String],
    draft: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let now = chrono::Utc::now().with_timezone(&site.tz);
    let path = create_post(site, title, tags, draft, now)?;
    writeln!(out, "Created: {}", path.display())?;
    Ok(())
}
