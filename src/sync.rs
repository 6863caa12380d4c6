//! The sync driver: read watermark, fetch, post oldest first, advance
//! watermark.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;

use crate::config::Config;
use crate::error::SyncResult;
use crate::{pinboard, pocket, watermark};

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// File holding the unix-seconds watermark of the last successful run.
    pub timestamp_file: PathBuf,
    /// Pause between consecutive Pinboard writes.
    pub post_delay: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub posted: usize,
    pub watermark: i64,
}

/// Performs one full sync cycle.
///
/// Posting stops at the first rejected item; the watermark only moves
/// once every fetched item has been posted, so a failed run is retried
/// in full next time.
pub async fn run(
    client: &reqwest::Client,
    config: &Config,
    options: &SyncOptions,
) -> SyncResult<RunSummary> {
    let since = watermark::read(&options.timestamp_file)?;
    tracing::info!(since, "fetching pocket items saved since watermark");

    let items = pocket::fetch_since(client, &config.pocket, since).await?;
    tracing::info!(count = items.len(), "pocket items to post");

    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            // Pinboard allows one write per user every three seconds.
            tokio::time::sleep(options.post_delay).await;
        }

        pinboard::add_post(client, &config.pinboard, item).await?;

        println!(
            "added to pinboard: {} - {} - {}",
            pinboard::isodate(item.saved_at),
            item.url,
            item.title
        );
        tracing::debug!(url = %item.url, saved_at = item.saved_at, "posted to pinboard");
    }

    let now = Utc::now().timestamp();
    watermark::write(&options.timestamp_file, now)?;
    tracing::debug!(watermark = now, "watermark advanced");

    Ok(RunSummary {
        posted: items.len(),
        watermark: now,
    })
}
