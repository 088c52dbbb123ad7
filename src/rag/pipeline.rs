use std::sync::Arc;

use super::context_builder::ContextAssembler;
use super::embedder::EmbeddingGenerator;
use super::retriever::PassageRetriever;
use super::synthesizer::{AnswerSynthesizer, ABSTENTION_MESSAGE};
use super::types::{AbstentionReason, AnswerOutcome, AnswerResult, Passage};
use crate::core::config::RagSettings;
use crate::llm::{ChatProvider, EmbeddingProvider};
use crate::search::SearchIndex;

/// One query in, one grounded answer (or refusal) out.
///
/// Holds no per-request state, so a single instance can serve concurrent
/// queries. Each stage completes before the next starts and nothing is retried.
#[derive(Clone)]
pub struct RagPipeline {
    embedder: EmbeddingGenerator,
    retriever: PassageRetriever,
    assembler: ContextAssembler,
    synthesizer: AnswerSynthesizer,
}

impl RagPipeline {
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn SearchIndex>,
        chat: Arc<dyn ChatProvider>,
        settings: &RagSettings,
    ) -> Self {
        Self {
            embedder: EmbeddingGenerator::new(embeddings),
            retriever: PassageRetriever::new(index, settings.top_k, settings.vector_field.clone()),
            assembler: ContextAssembler::from_settings(settings),
            synthesizer: AnswerSynthesizer::new(chat, settings),
        }
    }

    pub async fn answer(&self, query: &str) -> AnswerResult {
        let passages = match self.gather_passages(query).await {
            Ok(passages) => passages,
            Err(reason) => return abstain(reason),
        };

        let context = self.assembler.assemble(&passages);
        if context.is_empty() {
            return abstain(AbstentionReason::NoMatches);
        }

        match self.synthesizer.synthesize(query, &context).await {
            Ok(answer) => AnswerResult {
                answer,
                context,
                outcome: AnswerOutcome::Answered,
            },
            Err(err) => AnswerResult {
                answer: format!("An error occurred: {}", err),
                context,
                outcome: AnswerOutcome::SynthesisFailed {
                    reason: err.to_string(),
                },
            },
        }
    }

    /// Embed then search. Either failure ends the cycle with no passages.
    async fn gather_passages(&self, query: &str) -> Result<Vec<Passage>, AbstentionReason> {
        let vector = self
            .embedder
            .embed(query)
            .await
            .map_err(|err| AbstentionReason::NoVector {
                reason: err.to_string(),
            })?;

        self.retriever
            .retrieve(query, vector)
            .await
            .map_err(|err| AbstentionReason::SearchFailed {
                reason: err.to_string(),
            })
    }
}

fn abstain(reason: AbstentionReason) -> AnswerResult {
    tracing::info!(?reason, "No context retrieved, abstaining");
    AnswerResult {
        answer: ABSTENTION_MESSAGE.to_string(),
        context: String::new(),
        outcome: AnswerOutcome::Abstained { reason },
    }
}
