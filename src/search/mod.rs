//! Hybrid (lexical + vector) search over an existing document index.

pub mod azure;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::core::errors::ProviderError;

pub use azure::AzureSearchClient;

/// One raw hit: the selected fields as returned by the index.
pub type SearchHit = Map<String, Value>;

/// A single hybrid query: keyword match on `text`, nearest-neighbour match on `vector`.
#[derive(Debug, Clone, PartialEq)]
pub struct HybridQuery {
    pub text: String,
    pub vector: Vec<f32>,
    pub k: usize,
    pub vector_field: String,
    pub select: Vec<String>,
}

#[async_trait]
pub trait SearchIndex: Send + Sync {
    fn name(&self) -> &str;

    /// Hits ordered by the index's own fused relevance score.
    async fn hybrid_search(&self, query: HybridQuery) -> Result<Vec<SearchHit>, ProviderError>;
}
