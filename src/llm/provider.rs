use async_trait::async_trait;

use super::types::ChatRequest;
use crate::core::errors::ProviderError;

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// return the provider name (e.g. "azure_openai")
    fn name(&self) -> &str;

    /// deployment or model the vectors come from
    fn model(&self) -> &str;

    /// embed a single input text
    async fn embed(&self, input: &str) -> Result<Vec<f32>, ProviderError>;
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    /// chat completion (non-streaming)
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError>;
}
