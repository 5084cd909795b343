//! # pokefeed CLI
//!
//! Commands for pulling enriched catalog pages, building a static gallery,
//! and running the feed server.
//!
//! ## Usage
//!
//! ```bash
//! pokefeed --config ./config/pokefeed.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pokefeed fetch` | Fetch and print enriched pages |
//! | `pokefeed render` | Fetch pages and write a static gallery HTML file |
//! | `pokefeed serve` | Start the feed HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Print the first two pages
//! pokefeed fetch --pages 2
//!
//! # Build the full gallery (up to the pagination ceiling)
//! pokefeed render --output gallery.html
//!
//! # Serve the gallery with a pull-based next-page endpoint
//! pokefeed serve
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pokefeed::progress::ProgressMode;
use pokefeed::{config, fetch_cmd, gallery, serve};

/// pokefeed — a paginated creature-catalog feed client.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; every setting has a default, so the file is optional. See
/// `config/pokefeed.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "pokefeed",
    about = "pokefeed — a paginated creature-catalog feed client",
    version,
    long_about = "pokefeed pages through a remote catalog listing, concurrently enriches each \
    page with detail categories and images while tolerating per-entity failures, and renders \
    the result as HTML cards via a CLI, a static gallery writer, or a small feed server."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/pokefeed.toml`. If the file does not exist,
    /// built-in defaults are used (PokéAPI listing, page size 15, ceiling
    /// 150 entries).
    #[arg(long, global = true, default_value = "./config/pokefeed.toml")]
    config: PathBuf,

    /// Progress output on stderr: `auto` (human when stderr is a TTY),
    /// `human`, `json`, or `off`.
    #[arg(long, global = true, default_value = "auto")]
    progress: String,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch enriched pages and print them.
    ///
    /// Pulls pages through the feed controller, printing each entity's id,
    /// name, and categories, then a summary. Stops at the pagination
    /// ceiling or after `--pages`.
    Fetch {
        /// Maximum number of pages to fetch (default: until the ceiling).
        #[arg(long)]
        pages: Option<u32>,
    },

    /// Fetch pages and write a static gallery HTML document.
    Render {
        /// Output file for the gallery document.
        #[arg(long, short, default_value = "gallery.html")]
        output: PathBuf,

        /// Maximum number of pages to include (default: until the ceiling).
        #[arg(long)]
        pages: Option<u32>,
    },

    /// Start the feed HTTP server.
    ///
    /// Binds to `[server].bind` and serves the gallery at `/`, the
    /// pull-based page endpoint at `/feed/next`, and `/health`.
    Serve,
}

fn parse_progress(value: &str) -> anyhow::Result<ProgressMode> {
    match value {
        "auto" => Ok(ProgressMode::default_for_tty()),
        "human" => Ok(ProgressMode::Human),
        "json" => Ok(ProgressMode::Json),
        "off" => Ok(ProgressMode::Off),
        other => anyhow::bail!(
            "Unknown progress mode: '{}'. Must be auto, human, json, or off.",
            other
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        config::Config::minimal()
    };

    let progress = parse_progress(&cli.progress)?;

    match cli.command {
        Commands::Fetch { pages } => {
            fetch_cmd::run_fetch(&cfg, pages, progress).await?;
        }
        Commands::Render { output, pages } => {
            gallery::run_render(&cfg, &output, pages, progress).await?;
        }
        Commands::Serve => {
            serve::run_server(&cfg).await?;
        }
    }

    Ok(())
}
