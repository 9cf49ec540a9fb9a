//! Validate all content, optionally on every change

use anyhow::Result;
use notify::Watcher;
use std::io::Write;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::Site;

/// Load posts and authors, failing on the first bad record
pub fn run(site: &Site, out: &mut dyn Write) -> Result<()> {
    let start = Instant::now();

    let (posts, drafts) = site.posts().load_partitioned()?;
    let authors = site.authors().load_all()?;

    for post in &posts {
        for author in &post.authors {
            if !authors.iter().any(|a| &a.slug == author) {
                tracing::warn!("Post '{}' names unknown author '{}'", post.slug, author);
            }
        }
    }

    writeln!(
        out,
        "OK: {} posts, {} drafts, {} authors ({:.2}s)",
        posts.len(),
        drafts.len(),
        authors.len(),
        start.elapsed().as_secs_f64()
    )?;
    Ok(())
}

/// Re-run the check whenever content changes
pub fn watch(site: &Site, out: &mut dyn Write) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for dir in [&site.content_dir, &site.authors_dir] {
        if dir.exists() {
            watcher.watch(dir, notify::RecursiveMode::Recursive)?;
        }
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_check = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Editors emit bursts of events per save
                if last_check.elapsed() > Duration::from_millis(500) {
                    if let Err(e) = run(site, out) {
                        tracing::error!("Check failed: {}", e);
                    }
                    last_check = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
