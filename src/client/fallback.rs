// src/client/fallback.rs

//! Decides whether a failed fetch has a cached substitute.

use serde_json::Value;

use crate::client::cache::OfflineCache;
use crate::client::resource::Resource;

/// Returns the cached substitute for a resource whose network fetch
/// failed, or `None` when the failure must propagate to the caller.
///
/// Empty topic/secret snapshots do not count as substitutes, and no
/// resource outside the three cached kinds ever resolves: the resolver
/// never turns an outage into a fabricated empty success.
pub async fn resolve(cache: &OfflineCache, resource: &Resource) -> Option<Value> {
    match resource {
        Resource::Topics => {
            let topics = cache.topics().await;
            if topics.is_empty() {
                return None;
            }
            serde_json::to_value(topics).ok()
        }
        Resource::Secrets => {
            let secrets = cache.secrets().await;
            if secrets.is_empty() {
                return None;
            }
            serde_json::to_value(secrets).ok()
        }
        Resource::Progress(label) => {
            let progress = cache.progress_for_topic(label).await?;
            serde_json::to_value(progress).ok()
        }
        _ => None,
    }
}
