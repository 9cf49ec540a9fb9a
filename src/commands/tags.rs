//! List tags with post counts

use anyhow::Result;
use std::io::Write;

use crate::Site;

pub fn run(site: &Site, out: &mut dyn Write) -> Result<()> {
    let tags = site.posts().catalog()?.tags();

    writeln!(out, "Tags ({}):", tags.len())?;
    for tag in tags {
        writeln!(out, "  {} ({}) /tags/{}", tag.name, tag.count, tag.slug)?;
    }

    Ok(())
}
