// src/models/question.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single multiple-choice question as stored in the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier, unique across the whole corpus.
    pub qid: i64,

    /// Label of the owning topic.
    pub label: String,

    /// Title of the source post this question was extracted from.
    pub post_title: String,

    /// Source URL, passed through opaquely.
    pub source_url: String,

    /// The question prompt.
    pub question_text: String,

    /// Option key (e.g. "A") to option text. At least two entries.
    pub options: BTreeMap<String, String>,

    /// Keys of the correct options. Non-empty subset of `options` keys.
    pub correct: Vec<String>,

    /// Explanation shown after answering.
    pub explanation: String,
}

impl Question {
    /// Checks the corpus invariants for this question: at least two options
    /// and a non-empty `correct` set whose every key exists in `options`.
    pub fn check_integrity(&self) -> Result<(), String> {
        if self.options.len() < 2 {
            return Err(format!("question {} has fewer than two options", self.qid));
        }
        if self.correct.is_empty() {
            return Err(format!("question {} has no correct options", self.qid));
        }
        for key in &self.correct {
            if !self.options.contains_key(key) {
                return Err(format!(
                    "question {} marks unknown option '{}' as correct",
                    self.qid, key
                ));
            }
        }
        Ok(())
    }

    /// Case-insensitive substring match against the prompt, the explanation
    /// and every option value.
    pub fn matches(&self, lower_query: &str) -> bool {
        self.question_text.to_lowercase().contains(lower_query)
            || self.explanation.to_lowercase().contains(lower_query)
            || self
                .options
                .values()
                .any(|option| option.to_lowercase().contains(lower_query))
    }
}

/// A search hit: the question annotated with its owning topic label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionHit {
    #[serde(flatten)]
    pub question: Question,

    #[serde(rename = "topicLabel")]
    pub topic_label: String,
}
