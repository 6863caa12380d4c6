//! Pinboard posting connector.
//!
//! One GET against `/v1/posts/add` per item. Pinboard treats a
//! repeated URL as an update, so re-posting after a partial run is
//! safe.

use chrono::{DateTime, SecondsFormat};

use crate::config::PinboardConfig;
use crate::error::{SyncError, SyncResult};
use crate::formats::SavedItem;

/// Formats unix seconds as ISO-8601 UTC with a literal `Z` suffix, the
/// form Pinboard expects in `dt`.
pub fn isodate(unix_seconds: i64) -> String {
    // Out-of-range values clamp to the epoch instead of panicking.
    DateTime::from_timestamp(unix_seconds, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Joins tag names with `", "`. Pinboard tags cannot contain spaces,
/// so interior spaces become underscores.
pub fn tag_string(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| tag.replace(' ', "_"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Adds one bookmark, backdated to the item's save time.
pub async fn add_post(
    client: &reqwest::Client,
    config: &PinboardConfig,
    item: &SavedItem,
) -> SyncResult<()> {
    let dt = isodate(item.saved_at);
    let tags = tag_string(&item.tags);

    let response = client
        .get(&config.endpoint)
        .query(&[
            ("auth_token", config.api_token.as_str()),
            ("url", item.url.as_str()),
            ("description", item.title.as_str()),
            ("extended", item.excerpt.as_str()),
            ("tags", tags.as_str()),
            ("dt", dt.as_str()),
        ])
        .send()
        .await
        .map_err(|err| SyncError::PostFailed {
            url: item.url.clone(),
            reason: format!("GET {}: {err}", config.endpoint),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let body = body.trim();
        return Err(SyncError::PostFailed {
            url: item.url.clone(),
            reason: if body.is_empty() {
                format!("status {status}")
            } else {
                format!("status {status}: {body}")
            },
        });
    }

    Ok(())
}
