// src/models/progress.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Per-topic record of which questions a user has completed and answered
/// correctly. Upserts replace the stored record wholesale; there is no
/// merging of prior state.
///
/// `correct_answers ⊆ completed_questions` is not enforced here. Callers
/// own that relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    /// Label of the topic this record belongs to.
    #[validate(length(min = 1))]
    pub topic_label: String,

    /// Identifiers of questions the user has answered.
    pub completed_questions: Vec<i64>,

    /// Identifiers of questions the user answered correctly.
    pub correct_answers: Vec<i64>,
}

impl UserProgress {
    /// The empty record returned when a topic has never been attempted.
    pub fn empty(topic_label: impl Into<String>) -> Self {
        Self {
            topic_label: topic_label.into(),
            completed_questions: Vec::new(),
            correct_answers: Vec::new(),
        }
    }
}
