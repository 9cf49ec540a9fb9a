//! List posts

use anyhow::Result;
use std::io::Write;

use crate::content::date::format_date;
use crate::content::{Catalog, Post};
use crate::Site;

/// What to list
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub tag: Option<String>,
    pub page: Option<usize>,
    pub drafts: bool,
}

/// Run the list command
pub fn run(site: &Site, options: &ListOptions, out: &mut dyn Write) -> Result<()> {
    let index = site.posts();

    if options.drafts {
        let drafts = index.load_drafts()?;
        writeln!(out, "Drafts ({}):", drafts.len())?;
        for post in &drafts {
            write_post(site, post, out)?;
        }
        return Ok(());
    }

    let mut catalog = index.catalog()?;
    if let Some(tag) = &options.tag {
        let tagged = catalog.by_tag(tag)?.into_iter().cloned().collect();
        catalog = Catalog::from_listing(tagged);
    }

    match options.page {
        Some(n) => {
            let page = catalog.page(n, site.config.per_page)?;
            writeln!(out, "Posts (page {} of {}):", page.current, page.total_pages)?;
            for post in page.posts {
                write_post(site, post, out)?;
            }
        }
        None => {
            writeln!(out, "Posts ({}):", catalog.len())?;
            for post in catalog.posts() {
                write_post(site, post, out)?;
            }
        }
    }

    Ok(())
}

fn write_post(site: &Site, post: &Post, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "  {}  {}  {}",
        format_date(&post.date, &site.config.date_format),
        post.slug,
        post.title
    )?;
    Ok(())
}
