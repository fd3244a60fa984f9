pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::cluster_keywords::{ClusterKeywordsUseCase, ClusterRequest, ClusterRun};
use crate::application::normalize::{extract_topic, normalize};
use crate::config::ClusterDefaults;
use crate::domain::error::DomainError;
use crate::domain::ports::vectorizer::Vectorizer;
use crate::infrastructure::vectorizers::tfidf::TfIdfVectorizer;
use std::io::Read;
use std::sync::Arc;

pub struct KeywordClusterer {
    cluster_uc: ClusterKeywordsUseCase,
}

impl KeywordClusterer {
    /// TF-IDF vectorizer with defaults read from `KWCLUSTER_*` variables.
    pub fn new() -> Self {
        Self::with_options(ClusterDefaults::from_env(), Arc::new(TfIdfVectorizer))
    }

    pub fn with_options(defaults: ClusterDefaults, vectorizer: Arc<dyn Vectorizer>) -> Self {
        Self {
            cluster_uc: ClusterKeywordsUseCase::new(vectorizer, defaults),
        }
    }

    pub fn cluster(&self, request: &ClusterRequest) -> Result<ClusterRun, DomainError> {
        self.cluster_uc.execute(request)
    }

    /// Normalized and topic text for a single keyword.
    pub fn normalize_preview(&self, keyword: &str) -> (String, String) {
        let normalized = normalize(keyword);
        let topic = extract_topic(&normalized);
        (normalized, topic)
    }
}

impl Default for KeywordClusterer {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a request from a JSON file, or from stdin when `path` is `-`.
pub fn load_request(path: &str) -> Result<ClusterRequest, DomainError> {
    let json = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| DomainError::Io(format!("Cannot read {path}: {e}")))?
    };
    ClusterRequest::from_json(&json)
}
