// src/client/resource.rs

use url::Url;

/// Identifies a fetchable API resource. Doubles as the key for the session
/// memo and the offline fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Topics,
    Topic(String),
    Secrets,
    SearchQuestions(String),
    SearchSecrets(String),
    Progress(String),
}

impl Resource {
    /// Builds the request URL against the API base. Topic labels contain
    /// spaces and colons; pushing them as path segments percent-encodes
    /// them.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .expect("API base URL cannot be a base");
            segments.pop_if_empty();
            match self {
                Resource::Topics => segments.extend(["api", "topics"]),
                Resource::Topic(label) => segments.extend(["api", "topics"]).push(label),
                Resource::Secrets => segments.extend(["api", "secrets"]),
                Resource::SearchQuestions(_) => segments.extend(["api", "search", "questions"]),
                Resource::SearchSecrets(_) => segments.extend(["api", "search", "secrets"]),
                Resource::Progress(label) => segments.extend(["api", "progress"]).push(label),
            };
        }
        if let Resource::SearchQuestions(q) | Resource::SearchSecrets(q) = self {
            url.query_pairs_mut().append_pair("q", q);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://127.0.0.1:3000").unwrap()
    }

    #[test]
    fn plain_resources_map_to_api_paths() {
        assert_eq!(Resource::Topics.url(&base()).path(), "/api/topics");
        assert_eq!(Resource::Secrets.url(&base()).path(), "/api/secrets");
    }

    #[test]
    fn labels_are_percent_encoded_in_path_segments() {
        let url = Resource::Progress("MCQ : Trauma".to_string()).url(&base());
        assert!(url.path().starts_with("/api/progress/MCQ%20"));
        assert!(!url.path().contains(' '));
    }

    #[test]
    fn search_queries_land_in_the_query_string() {
        let url = Resource::SearchQuestions("murphy sign".to_string()).url(&base());
        assert_eq!(url.path(), "/api/search/questions");
        assert_eq!(url.query(), Some("q=murphy+sign"));
    }
}
