//! Scrape, filter, inventory and download for one district

use chrono::Utc;
use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::downloader::download_all;
use crate::errors::LnmResult;
use crate::inventory::local_inventory;
use crate::listing::{region_url, scrape_for_pdfs};
use crate::models::{Region, RunReport};
use crate::recent::filter_recent;

/// Run the whole fetch for `region`. Returns once every download has
/// finished or failed; only an unreadable download directory is fatal.
pub async fn run(config: &Config, region: Region) -> LnmResult<RunReport> {
    let client = Client::builder()
        .user_agent(&config.http.user_agent)
        .timeout(config.http_timeout())
        .build()?;

    let listing_url = region_url(&config.base_url, region);
    let all_links = scrape_for_pdfs(&client, &listing_url).await;
    let links_found = all_links.len();

    let retained = filter_recent(all_links, config.recent_count);
    let inventory = local_inventory(&config.download_dir)?;

    let downloads = download_all(
        &client,
        &config.base_url,
        &config.download_dir,
        &retained,
        &inventory,
        config.clean,
    )
    .await;

    let report = RunReport {
        region,
        listing_url,
        links_found,
        retained,
        downloads,
        finished_at: Utc::now(),
    };
    info!(
        "District {}: {} downloaded, {} skipped, {} failed",
        region,
        report.downloaded(),
        report.skipped(),
        report.failed()
    );

    Ok(report)
}
