//! Pocket retrieve connector.
//!
//! One GET against `/v3/get` per run, asking for unread items saved
//! after the watermark. The response object is normalized into
//! [`SavedItem`]s sorted oldest first.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::PocketConfig;
use crate::error::{SyncError, SyncResult};
use crate::formats::SavedItem;

#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    #[serde(default)]
    list: ItemList,
}

/// Pocket returns `list` as an object keyed by item id, except when the
/// window is empty, where it returns `[]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemList {
    Entries(BTreeMap<String, Entry>),
    Empty(Vec<serde_json::Value>),
}

impl Default for ItemList {
    fn default() -> Self {
        Self::Empty(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
struct Entry {
    resolved_url: Option<String>,
    resolved_title: Option<String>,
    excerpt: Option<String>,
    #[serde(default, deserialize_with = "unix_seconds")]
    time_added: i64,
    #[serde(default)]
    tags: BTreeMap<String, serde_json::Value>,
}

/// Pocket transmits timestamps as JSON strings.
fn unix_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Retrieves unread items saved after `since`, oldest first.
pub async fn fetch_since(
    client: &reqwest::Client,
    config: &PocketConfig,
    since: i64,
) -> SyncResult<Vec<SavedItem>> {
    let since = since.to_string();
    let response = client
        .get(&config.endpoint)
        .query(&[
            ("consumer_key", config.consumer_key.as_str()),
            ("access_token", config.access_token.as_str()),
            ("since", since.as_str()),
            ("sort", "oldest"),
            ("detailType", "complete"),
            ("state", "unread"),
        ])
        .send()
        .await
        .map_err(|err| SyncError::FetchFailed {
            reason: format!("GET {}: {err}", config.endpoint),
        })?;

    let status = response.status();
    let raw = response.text().await.map_err(|err| SyncError::FetchFailed {
        reason: format!("read response body: {err}"),
    })?;
    if !status.is_success() {
        return Err(SyncError::FetchFailed {
            reason: format!("status {status}: {}", raw.trim()),
        });
    }

    parse_items(&raw)
}

fn parse_items(raw: &str) -> SyncResult<Vec<SavedItem>> {
    let parsed: RetrieveResponse =
        serde_json::from_str(raw).map_err(|err| SyncError::FetchFailed {
            reason: format!("parse response: {err}"),
        })?;
    Ok(normalize(parsed))
}

fn normalize(response: RetrieveResponse) -> Vec<SavedItem> {
    let entries = match response.list {
        ItemList::Entries(entries) => entries,
        ItemList::Empty(_) => BTreeMap::new(),
    };

    let total = entries.len();
    let mut items = Vec::with_capacity(total);
    for entry in entries.into_values() {
        // Items Pocket has not finished resolving lack these fields.
        let Entry {
            resolved_url: Some(url),
            resolved_title: Some(title),
            excerpt: Some(excerpt),
            time_added,
            tags,
        } = entry
        else {
            continue;
        };

        items.push(SavedItem {
            url,
            title,
            excerpt,
            saved_at: time_added,
            tags: tags.into_keys().collect(),
        });
    }
    if items.len() < total {
        tracing::debug!(
            total,
            skipped = total - items.len(),
            "skipped unresolved pocket items"
        );
    }

    // `sort=oldest` is requested, but JSON object order carries no guarantee.
    items.sort_by_key(|item| item.saved_at);
    items
}
