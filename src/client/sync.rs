// src/client/sync.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Interval;

use crate::client::cache::QueueOp;
use crate::client::gateway::ApiClient;

/// Connectivity signal shared between the gateway and the sync agent.
/// The embedding application flips it from its online/offline events;
/// nothing here polls the network.
#[derive(Debug, Clone)]
pub struct Connectivity {
    tx: Arc<watch::Sender<bool>>,
}

impl Connectivity {
    pub fn new(initially_online: bool) -> Self {
        let (tx, _rx) = watch::channel(initially_online);
        Self { tx: Arc::new(tx) }
    }

    pub fn set_online(&self, online: bool) {
        self.tx.send_replace(online);
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Counts from one flush pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub attempted: usize,
    pub synced: usize,
    pub failed: usize,
}

/// Replays queued offline progress writes once connectivity returns.
///
/// Best-effort and not transactional: entries are attempted once per pass
/// in enqueue order, and overlapping passes are not coordinated.
pub struct SyncAgent {
    client: ApiClient,
    events: watch::Receiver<bool>,
    interval: Option<Duration>,
}

impl SyncAgent {
    pub fn new(client: ApiClient, events: watch::Receiver<bool>) -> Self {
        Self {
            client,
            events,
            interval: None,
        }
    }

    /// Adds a periodic flush while online, for environments without a
    /// reliable connectivity event.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Runs the agent until the connectivity sender is dropped.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        let mut was_online = *self.events.borrow_and_update();
        let mut ticker = self.interval.map(tokio::time::interval);
        loop {
            tokio::select! {
                changed = self.events.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let online = *self.events.borrow_and_update();
                    if online && !was_online {
                        let outcome = Self::flush(&self.client).await;
                        if outcome.attempted > 0 {
                            tracing::info!(
                                "connectivity restored, synced {}/{} queued writes",
                                outcome.synced,
                                outcome.attempted
                            );
                        }
                    }
                    was_online = online;
                }
                _ = tick(&mut ticker) => {
                    if was_online {
                        Self::flush(&self.client).await;
                    }
                }
            }
        }
    }

    /// One flush pass: replay every queued entry in FIFO order, then clear
    /// the queue wholesale. Entries that fail to submit are logged and
    /// skipped; they do not survive the pass.
    pub async fn flush(client: &ApiClient) -> SyncOutcome {
        let entries = client.cache().queue_snapshot().await;
        let mut outcome = SyncOutcome {
            attempted: entries.len(),
            ..SyncOutcome::default()
        };

        for entry in entries {
            let result = match entry.op {
                QueueOp::Progress => client.replay_progress(&entry.data).await,
            };
            match result {
                Ok(()) => outcome.synced += 1,
                Err(err) => {
                    tracing::warn!(
                        "failed to sync queued progress for '{}': {}",
                        entry.data.topic_label,
                        err
                    );
                    outcome.failed += 1;
                }
            }
        }

        if let Err(err) = client.cache().clear_queue().await {
            tracing::warn!("failed to clear offline queue: {}", err);
        }
        outcome
    }
}

async fn tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
