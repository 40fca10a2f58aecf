// src/client/cache.rs

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::client::error::ClientError;
use crate::models::{progress::UserProgress, secret::SurgerySecret, topic::Topic};

// Namespace files under the cache directory.
const TOPICS: &str = "topics.json";
const SECRETS: &str = "secrets.json";
const PROGRESS: &str = "progress.json";
const OFFLINE_QUEUE: &str = "offline_queue.json";

/// Operation tag for queued offline writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueOp {
    #[serde(rename = "progress")]
    Progress,
}

/// A write that failed over the network, held for the sync agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineQueueEntry {
    #[serde(rename = "type")]
    pub op: QueueOp,
    pub data: UserProgress,
    pub timestamp: DateTime<Utc>,
}

impl OfflineQueueEntry {
    pub fn progress(data: UserProgress) -> Self {
        Self {
            op: QueueOp::Progress,
            data,
            timestamp: Utc::now(),
        }
    }
}

/// Durable mirror of server responses plus the offline write queue, one
/// JSON file per namespace under the cache directory. Not a source of
/// truth: the network response always wins when reachable.
///
/// Reads of never-written namespaces return the empty shape, never an
/// error.
#[derive(Debug, Clone)]
pub struct OfflineCache {
    dir: PathBuf,
}

impl OfflineCache {
    /// Opens the cache, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    async fn read_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        match fs::read_to_string(self.path(name)).await {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!("discarding unreadable cache namespace {}: {}", name, err);
                    T::default()
                }
            },
            Err(_) => T::default(),
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), ClientError> {
        let text = serde_json::to_string(value)?;
        fs::write(self.path(name), text).await?;
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), ClientError> {
        match fs::remove_file(self.path(name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn exists(&self, name: &str) -> bool {
        fs::metadata(self.path(name)).await.is_ok()
    }

    pub async fn store_topics(&self, topics: &[Topic]) -> Result<(), ClientError> {
        self.write(TOPICS, topics).await
    }

    pub async fn topics(&self) -> Vec<Topic> {
        self.read_or_default(TOPICS).await
    }

    pub async fn has_topics(&self) -> bool {
        self.exists(TOPICS).await
    }

    pub async fn store_secrets(&self, secrets: &[SurgerySecret]) -> Result<(), ClientError> {
        self.write(SECRETS, secrets).await
    }

    pub async fn secrets(&self) -> Vec<SurgerySecret> {
        self.read_or_default(SECRETS).await
    }

    pub async fn has_secrets(&self) -> bool {
        self.exists(SECRETS).await
    }

    /// Merges one record into the progress map keyed by topic label.
    pub async fn store_progress(&self, progress: &UserProgress) -> Result<(), ClientError> {
        let mut map: BTreeMap<String, UserProgress> = self.read_or_default(PROGRESS).await;
        map.insert(progress.topic_label.clone(), progress.clone());
        self.write(PROGRESS, &map).await
    }

    pub async fn progress(&self) -> BTreeMap<String, UserProgress> {
        self.read_or_default(PROGRESS).await
    }

    pub async fn progress_for_topic(&self, topic_label: &str) -> Option<UserProgress> {
        self.progress().await.remove(topic_label)
    }

    /// Appends to the offline write queue.
    pub async fn enqueue(&self, entry: OfflineQueueEntry) -> Result<(), ClientError> {
        let mut queue: Vec<OfflineQueueEntry> = self.read_or_default(OFFLINE_QUEUE).await;
        queue.push(entry);
        self.write(OFFLINE_QUEUE, &queue).await
    }

    /// The queued entries in enqueue (FIFO) order.
    pub async fn queue_snapshot(&self) -> Vec<OfflineQueueEntry> {
        self.read_or_default(OFFLINE_QUEUE).await
    }

    /// Drops the whole queue. Called after a sync pass has attempted every
    /// entry, not entry-by-entry.
    pub async fn clear_queue(&self) -> Result<(), ClientError> {
        self.remove(OFFLINE_QUEUE).await
    }

    /// Wipes every namespace. Used by the full progress/data reset.
    pub async fn clear_all(&self) -> Result<(), ClientError> {
        for name in [TOPICS, SECRETS, PROGRESS, OFFLINE_QUEUE] {
            self.remove(name).await?;
        }
        Ok(())
    }
}
