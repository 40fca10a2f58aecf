// src/store/mod.rs

pub mod memory;

use async_trait::async_trait;

use crate::models::{
    progress::UserProgress, question::QuestionHit, secret::SurgerySecret, topic::Topic,
};

pub use memory::{CorpusError, MemStorage};

/// Data access contract the HTTP handlers are written against: read-only
/// corpus lookups plus the per-topic progress records.
///
/// Lookup misses are `None`, not errors. Mutations cannot fail; payload
/// validation happens at the HTTP boundary before a record reaches the
/// store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// The full corpus, in load order.
    async fn topics(&self) -> Vec<Topic>;

    /// Exact-match lookup by label.
    async fn topic_by_label(&self, label: &str) -> Option<Topic>;

    /// The fixed surgery-secrets list, in ordinal order.
    async fn surgery_secrets(&self) -> Vec<SurgerySecret>;

    /// Case-insensitive substring search over question prompt, explanation
    /// and option values. Results keep corpus traversal order; no ranking.
    async fn search_questions(&self, query: &str) -> Vec<QuestionHit>;

    /// Case-insensitive substring search over secret text, in corpus order.
    async fn search_secrets(&self, query: &str) -> Vec<SurgerySecret>;

    /// Progress for one topic. `None` for a topic never attempted.
    async fn user_progress(&self, topic_label: &str) -> Option<UserProgress>;

    /// Replaces any stored record for the topic wholesale and returns the
    /// stored value.
    async fn update_user_progress(&self, progress: UserProgress) -> UserProgress;

    /// Clears every progress record. Irreversible.
    async fn reset_all_progress(&self);
}
