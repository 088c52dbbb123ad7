//! Typed view over the merged configuration.
//!
//! Every tunable of the query pipeline lives here so it can be set from
//! `config.yml` and overridden directly in tests.

use serde::{Deserialize, Serialize};

use crate::core::errors::ConfigError;

pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 10_000;
pub const DEFAULT_TRUNCATION_MARKER: &str = "...";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f64 = 1.0;
pub const DEFAULT_TOP_P: f64 = 1.0;
pub const DEFAULT_VECTOR_FIELD: &str = "text_vector";

pub const OPENAI_API_VERSION: &str = "2024-02-01";
pub const SEARCH_API_VERSION: &str = "2023-11-01";
pub const EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const GENERATION_MODEL: &str = "gpt-35-turbo";

/// Connection settings for an OpenAI-compatible deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    /// Deployment name; also sent as the `model` field.
    pub model: String,
}

impl ServiceSettings {
    fn with_model(model: &str) -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: OPENAI_API_VERSION.to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub index_name: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: SEARCH_API_VERSION.to_string(),
            index_name: String::new(),
        }
    }
}

/// Retrieval and sampling policy for one query cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagSettings {
    /// Nearest neighbours requested for the vector half of the hybrid search.
    pub top_k: usize,
    pub vector_field: String,
    /// Hard cut for the assembled context, counted in characters.
    pub max_context_chars: usize,
    pub truncation_marker: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            vector_field: DEFAULT_VECTOR_FIELD.to_string(),
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
            truncation_marker: DEFAULT_TRUNCATION_MARKER.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub embedding: ServiceSettings,
    pub generation: ServiceSettings,
    pub search: SearchSettings,
    pub rag: RagSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            embedding: ServiceSettings::with_model(EMBEDDING_MODEL),
            generation: ServiceSettings::with_model(GENERATION_MODEL),
            search: SearchSettings::default(),
            rag: RagSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

impl AppConfig {
    /// Checks that every external service can actually be reached.
    pub fn require_services(&self) -> Result<(), ConfigError> {
        let required = [
            ("embedding.endpoint", &self.embedding.endpoint),
            ("embedding.api_key", &self.embedding.api_key),
            ("generation.endpoint", &self.generation.endpoint),
            ("generation.api_key", &self.generation.api_key),
            ("search.endpoint", &self.search.endpoint),
            ("search.api_key", &self.search.api_key),
            ("search.index_name", &self.search.index_name),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(key));
            }
        }
        Ok(())
    }
}
