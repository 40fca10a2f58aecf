// src/models/topic.rs

use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// A named grouping of quiz questions. The label is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub label: String,
    pub questions: Vec<Question>,
}

/// Corpus labels carry this prefix; display names drop it.
const LABEL_PREFIX: &str = "MCQ : ";

impl Topic {
    /// Display category derived from the label by stripping the corpus
    /// prefix. Lossy: labels without the prefix pass through unchanged.
    pub fn display_category(&self) -> &str {
        self.label.strip_prefix(LABEL_PREFIX).unwrap_or(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_category_strips_prefix() {
        let topic = Topic {
            label: "MCQ : Trauma".to_string(),
            questions: vec![],
        };
        assert_eq!(topic.display_category(), "Trauma");
    }

    #[test]
    fn display_category_passes_unprefixed_labels_through() {
        let topic = Topic {
            label: "Trauma".to_string(),
            questions: vec![],
        };
        assert_eq!(topic.display_category(), "Trauma");
    }
}
