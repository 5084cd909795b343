//! `pokefeed fetch` — pull pages through the feed and print a summary.

use anyhow::Result;

use crate::assets;
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::feed::FeedController;
use crate::pagination::Paginator;
use crate::progress::ProgressMode;

/// Fetch up to `pages` pages (or until the feed is done) and print one
/// summary line per page plus totals on stdout.
pub async fn run_fetch(config: &Config, pages: Option<u32>, progress: ProgressMode) -> Result<()> {
    let client = CatalogClient::new(&config.api)?;
    let images = assets::open_store(&config.assets, config.api.timeout_secs)?;
    let paginator = Paginator::new(config.api.page_size, config.feed.max_entries);
    let mut feed =
        FeedController::new(client, images, paginator).with_progress(progress.reporter());

    let mut fetched_pages = 0u32;
    let mut total_records = 0usize;

    loop {
        if let Some(limit) = pages {
            if fetched_pages >= limit {
                break;
            }
        }

        let offset = feed.offset();
        match feed.next_page().await? {
            Some(records) => {
                println!("page offset {}: {} entities", offset, records.len());
                for record in &records {
                    println!(
                        "  {}. {} [{}]",
                        record.id,
                        record.name,
                        record.categories.join(", ")
                    );
                }
                fetched_pages += 1;
                total_records += records.len();
            }
            None => break,
        }
    }

    println!("fetch");
    println!("  pages: {}", fetched_pages);
    println!("  entities: {}", total_records);
    println!("  offset: {}", feed.offset());
    println!("ok");

    Ok(())
}
