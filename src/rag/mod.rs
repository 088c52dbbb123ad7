//! Retrieval-augmented answering over the legal corpus.
//!
//! - `EmbeddingGenerator`: query text to vector
//! - `PassageRetriever`: hybrid search for candidate passages
//! - `ContextAssembler`: bounded context string from passages
//! - `AnswerSynthesizer`: grounded completion from context and query
//! - `RagPipeline`: sequences the above and decides when to abstain

mod context_builder;
mod embedder;
mod error;
mod pipeline;
mod retriever;
mod synthesizer;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use context_builder::{ContextAssembler, PASSAGE_SEPARATOR};
pub use embedder::EmbeddingGenerator;
pub use error::{EmbeddingError, RetrievalError, SynthesisError};
pub use pipeline::RagPipeline;
pub use retriever::{PassageRetriever, MISSING_FIELD_PLACEHOLDER};
pub use synthesizer::{AnswerSynthesizer, ABSTENTION_MESSAGE, GROUNDING_SYSTEM_PROMPT};
pub use types::{AbstentionReason, AnswerOutcome, AnswerResult, Passage};
