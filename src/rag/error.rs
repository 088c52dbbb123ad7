use thiserror::Error;

use crate::core::errors::ProviderError;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("embedding service returned an empty vector")]
    EmptyVector,
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
