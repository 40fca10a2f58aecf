// src/store/memory.rs

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    progress::UserProgress,
    question::QuestionHit,
    secret::SurgerySecret,
    topic::Topic,
};
use crate::store::Storage;

/// Raised while loading the corpus at startup. Fatal: the server refuses to
/// start without a valid corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse corpus file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid corpus: {0}")]
    Invalid(String),
}

/// In-memory storage backend. The corpus is loaded once at construction and
/// read-only afterwards; progress lives in a mutex-guarded map so wholesale
/// upserts keep single-writer semantics on a multi-threaded runtime.
#[derive(Debug)]
pub struct MemStorage {
    topics: Vec<Topic>,
    secrets: Vec<SurgerySecret>,
    progress: Mutex<HashMap<String, UserProgress>>,
}

impl MemStorage {
    /// Builds a storage over an already-deserialized corpus, validating the
    /// corpus invariants. Used directly by tests with fixture corpora.
    pub fn new(topics: Vec<Topic>, secrets: Vec<SurgerySecret>) -> Result<Self, CorpusError> {
        Self::validate(&topics, &secrets)?;
        Ok(Self {
            topics,
            secrets,
            progress: Mutex::new(HashMap::new()),
        })
    }

    /// Loads and validates the corpus from the two JSON files the deployment
    /// ships.
    pub fn load(
        topics_path: impl AsRef<Path>,
        secrets_path: impl AsRef<Path>,
    ) -> Result<Self, CorpusError> {
        let topics: Vec<Topic> = serde_json::from_str(&std::fs::read_to_string(topics_path)?)?;
        let secrets: Vec<SurgerySecret> =
            serde_json::from_str(&std::fs::read_to_string(secrets_path)?)?;
        Self::new(topics, secrets)
    }

    fn validate(topics: &[Topic], secrets: &[SurgerySecret]) -> Result<(), CorpusError> {
        let mut labels = HashSet::new();
        let mut qids = HashSet::new();
        for topic in topics {
            if !labels.insert(topic.label.as_str()) {
                return Err(CorpusError::Invalid(format!(
                    "duplicate topic label '{}'",
                    topic.label
                )));
            }
            for question in &topic.questions {
                question.check_integrity().map_err(CorpusError::Invalid)?;
                if !qids.insert(question.qid) {
                    return Err(CorpusError::Invalid(format!(
                        "duplicate question id {}",
                        question.qid
                    )));
                }
            }
        }

        let mut numbers = HashSet::new();
        for secret in secrets {
            if !numbers.insert(secret.number) {
                return Err(CorpusError::Invalid(format!(
                    "duplicate secret number {}",
                    secret.number
                )));
            }
        }
        Ok(())
    }

    fn progress_map(&self) -> std::sync::MutexGuard<'_, HashMap<String, UserProgress>> {
        self.progress.lock().expect("progress map lock poisoned")
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn topics(&self) -> Vec<Topic> {
        self.topics.clone()
    }

    async fn topic_by_label(&self, label: &str) -> Option<Topic> {
        self.topics.iter().find(|topic| topic.label == label).cloned()
    }

    async fn surgery_secrets(&self) -> Vec<SurgerySecret> {
        self.secrets.clone()
    }

    async fn search_questions(&self, query: &str) -> Vec<QuestionHit> {
        let lower_query = query.to_lowercase();
        let mut results = Vec::new();
        for topic in &self.topics {
            for question in &topic.questions {
                if question.matches(&lower_query) {
                    results.push(QuestionHit {
                        question: question.clone(),
                        topic_label: topic.label.clone(),
                    });
                }
            }
        }
        results
    }

    async fn search_secrets(&self, query: &str) -> Vec<SurgerySecret> {
        let lower_query = query.to_lowercase();
        self.secrets
            .iter()
            .filter(|secret| secret.point.to_lowercase().contains(&lower_query))
            .cloned()
            .collect()
    }

    async fn user_progress(&self, topic_label: &str) -> Option<UserProgress> {
        self.progress_map().get(topic_label).cloned()
    }

    async fn update_user_progress(&self, progress: UserProgress) -> UserProgress {
        self.progress_map()
            .insert(progress.topic_label.clone(), progress.clone());
        progress
    }

    async fn reset_all_progress(&self) {
        self.progress_map().clear();
    }
}
