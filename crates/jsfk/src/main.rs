//! jsfk CLI - content toolkit for the JS F/k blog.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod watcher;

#[derive(Parser)]
#[command(name = "jsfk")]
#[command(about = "Validate, index and publish JS F/k articles")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the frontmatter of every article
    Check,

    /// Write the per-locale article data files
    Index {
        /// Print the data to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Generate RSS feeds
    Feed {
        /// Only generate the feed of this locale
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Validate articles and write indexes, feeds and the sitemap
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report translation coverage of non-root locales
    Translations {
        /// Write shields.io badge files and print them as JSON
        #[arg(long)]
        json: bool,

        /// Directory for badge files
        #[arg(long, default_value = "ci/badges")]
        badges: PathBuf,
    },

    /// Scaffold site.toml and a sample article
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Rebuild whenever articles or the config change
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Check => {
            commands::check::run(&cli.config).await?;
        }
        Commands::Index { stdout } => {
            commands::index::run(&cli.config, stdout).await?;
        }
        Commands::Feed { locale } => {
            commands::feed::run(&cli.config, locale).await?;
        }
        Commands::Build { output } => {
            commands::build::run(&cli.config, output).await?;
        }
        Commands::Translations { json, badges } => {
            commands::translations::run(&cli.config, json, badges).await?;
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Watch => {
            commands::watch::run(&cli.config).await?;
        }
    }

    Ok(())
}
