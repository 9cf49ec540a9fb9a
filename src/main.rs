//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands;
use folio::Site;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Index and check the posts of a markdown blog", long_about = None)]
struct Cli {
    /// Site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published posts, newest first
    #[command(alias = "ls")]
    List {
        /// Only posts with this tag (case-insensitive)
        #[arg(short, long)]
        tag: Option<String>,

        /// Show one page of the listing
        #[arg(short, long)]
        page: Option<usize>,

        /// List drafts instead of published posts
        #[arg(long)]
        drafts: bool,
    },

    /// List tags with post counts
    Tags,

    /// Show one post's metadata
    Show {
        /// Post slug
        slug: String,

        /// Also print the rendered HTML body
        #[arg(long)]
        html: bool,
    },

    /// Validate every post and author
    Check {
        /// Re-check whenever content changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Tag to add (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Mark the post as a draft
        #[arg(long)]
        draft: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let site = Site::new(&base_dir)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::List { tag, page, drafts } => {
            let options = commands::list::ListOptions { tag, page, drafts };
            commands::list::run(&site, &options, &mut out)?;
        }

        Commands::Tags => {
            commands::tags::run(&site, &mut out)?;
        }

        Commands::Show { slug, html } => {
            commands::show::run(&site, &slug, html, &mut out)?;
        }

        Commands::Check { watch } => {
            let result = commands::check::run(&site, &mut out);
            if !watch {
                return result;
            }
            if let Err(e) = result {
                tracing::error!("Check failed: {}", e);
            }
            commands::check::watch(&site, &mut out)?;
        }

        Commands::New { title, tags, draft } => {
            commands::new::run(&site, &title, &tags, draft, &mut out)?;
        }
    }

    Ok(())
}
