//! Show a single post

use anyhow::Result;
use std::io::Write;

use crate::content::date::format_date;
use crate::Site;

/// Run the show command
pub fn run(site: &Site, slug: &str, html: bool, out: &mut dyn Write) -> Result<()> {
    let catalog = site.posts().catalog()?;
    let post = catalog.by_slug(slug)?;
    let authors = site.authors().load_all()?;
    let format = &site.config.date_format;

    writeln!(out, "Title:    {}", post.title)?;
    writeln!(out, "Slug:     {}", post.slug)?;
    writeln!(out, "Source:   {}", post.source)?;
    writeln!(out, "Date:     {}", format_date(&post.date, format))?;
    if let Some(lastmod) = &post.lastmod {
        writeln!(out, "Updated:  {}", format_date(lastmod, format))?;
    }
    if !post.tags.is_empty() {
        writeln!(out, "Tags:     {}", post.tags.join(", "))?;
    }

    let names: Vec<&str> = post
        .authors
        .iter()
        .map(|a| {
            authors
                .iter()
                .find(|author| &author.slug == a)
                .map(|author| author.name.as_str())
                .unwrap_or(a.as_str())
        })
        .collect();
    writeln!(out, "Authors:  {}", names.join(", "))?;
    writeln!(out, "Reading:  {} min", post.reading_time())?;
    if let Some(summary) = &post.summary {
        writeln!(out, "Summary:  {}", summary)?;
    }

    let neighbours = catalog.neighbours(slug)?;
    if let Some(newer) = neighbours.newer {
        writeln!(out, "Newer:    {}", newer.slug)?;
    }
    if let Some(older) = neighbours.older {
        writeln!(out, "Older:    {}", older.slug)?;
    }

    if html {
        writeln!(out)?;
        write!(out, "{}", site.renderer().render(&post.body))?;
    }

    Ok(())
}
