use std::sync::Arc;

use super::error::SynthesisError;
use crate::core::config::RagSettings;
use crate::llm::{ChatMessage, ChatProvider, ChatRequest};

/// Fixed refusal, used both by the model prompt and by the abstention branch.
pub const ABSTENTION_MESSAGE: &str = "I cannot find the answer in the provided documents.";

pub const GROUNDING_SYSTEM_PROMPT: &str = "You are a professional legal Assistant. Answer questions based ONLY on the provided legal context. If the answer is not in the context, state 'I cannot find the answer in the provided documents.'";

/// Asks the generation service for an answer grounded in the supplied context.
#[derive(Clone)]
pub struct AnswerSynthesizer {
    provider: Arc<dyn ChatProvider>,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
}

impl AnswerSynthesizer {
    pub fn new(provider: Arc<dyn ChatProvider>, settings: &RagSettings) -> Self {
        Self {
            provider,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            top_p: settings.top_p,
        }
    }

    pub fn build_request(&self, query: &str, context: &str) -> ChatRequest {
        ChatRequest::new(vec![
            ChatMessage::system(GROUNDING_SYSTEM_PROMPT),
            ChatMessage::user(format!("Context: {}\n\nQuestion: {}", context, query)),
        ])
        .with_sampling(self.max_tokens, self.temperature, self.top_p)
    }

    /// `context` must be non-empty; empty context is handled by abstaining upstream.
    pub async fn synthesize(&self, query: &str, context: &str) -> Result<String, SynthesisError> {
        let request = self.build_request(query, context);
        self.provider.chat(request).await.map_err(|err| {
            tracing::error!(
                "An error occurred during LLM completion ({}): {}",
                self.provider.model(),
                err
            );
            SynthesisError::from(err)
        })
    }
}
