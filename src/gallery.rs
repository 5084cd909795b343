//! `pokefeed render` — build a static gallery document.

use anyhow::{Context, Result};
use std::path::Path;

use crate::assets;
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::feed::FeedController;
use crate::pagination::Paginator;
use crate::progress::ProgressMode;
use crate::render::render_document;

/// Fetch up to `pages` pages (default: the whole feed, up to the ceiling)
/// and write one self-contained gallery HTML document to `output`.
pub async fn run_render(
    config: &Config,
    output: &Path,
    pages: Option<u32>,
    progress: ProgressMode,
) -> Result<()> {
    let client = CatalogClient::new(&config.api)?;
    let images = assets::open_store(&config.assets, config.api.timeout_secs)?;
    let paginator = Paginator::new(config.api.page_size, config.feed.max_entries);
    let mut feed =
        FeedController::new(client, images, paginator).with_progress(progress.reporter());

    let mut records = Vec::new();
    let mut fetched_pages = 0u32;

    loop {
        if let Some(limit) = pages {
            if fetched_pages >= limit {
                break;
            }
        }

        match feed.next_page().await? {
            Some(page) => {
                records.extend(page);
                fetched_pages += 1;
            }
            None => break,
        }
    }

    // A static document has no feed endpoint to point the sentinel at.
    let html = render_document(&records, None);
    std::fs::write(output, html)
        .with_context(|| format!("Failed to write gallery: {}", output.display()))?;

    println!("render");
    println!("  pages: {}", fetched_pages);
    println!("  entities: {}", records.len());
    println!("  output: {}", output.display());
    println!("ok");

    Ok(())
}
