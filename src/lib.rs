//! Legal document question answering backed by retrieval-augmented generation.

pub mod core;
pub mod llm;
pub mod rag;
pub mod search;
pub mod server;
pub mod state;

#[cfg(test)]
mod testing;

pub use rag::{AnswerOutcome, AnswerResult, RagPipeline};
