use std::sync::Arc;

use super::error::EmbeddingError;
use crate::llm::EmbeddingProvider;

/// Turns query text into a vector. One request per call, no retry.
#[derive(Clone)]
pub struct EmbeddingGenerator {
    provider: Arc<dyn EmbeddingProvider>,
}

impl EmbeddingGenerator {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let vector = self.provider.embed(text).await.map_err(|err| {
            tracing::warn!(
                "An error occurred during embedding generation ({}): {}",
                self.provider.model(),
                err
            );
            EmbeddingError::from(err)
        })?;

        if vector.is_empty() {
            tracing::warn!("Embedding service returned an empty vector");
            return Err(EmbeddingError::EmptyVector);
        }

        tracing::debug!(dimensions = vector.len(), "Query embedded");
        Ok(vector)
    }
}
