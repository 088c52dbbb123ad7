//! Context assembly.
//!
//! Renders passages in retrieval order, joins them with a single space and
//! enforces the character budget with a hard cut. The cut may split a word;
//! it never splits a character.

use super::types::Passage;
use crate::core::config::RagSettings;

pub const PASSAGE_SEPARATOR: &str = " ";

#[derive(Debug, Clone)]
pub struct ContextAssembler {
    max_context_chars: usize,
    truncation_marker: String,
}

impl ContextAssembler {
    pub fn new(max_context_chars: usize, truncation_marker: impl Into<String>) -> Self {
        Self {
            max_context_chars,
            truncation_marker: truncation_marker.into(),
        }
    }

    pub fn from_settings(settings: &RagSettings) -> Self {
        Self::new(settings.max_context_chars, settings.truncation_marker.clone())
    }

    pub fn max_context_chars(&self) -> usize {
        self.max_context_chars
    }

    /// Empty input yields an empty string, which callers treat as "nothing found".
    pub fn assemble(&self, passages: &[Passage]) -> String {
        if passages.is_empty() {
            return String::new();
        }

        let joined = passages
            .iter()
            .map(Passage::render)
            .collect::<Vec<_>>()
            .join(PASSAGE_SEPARATOR);

        self.truncate(joined)
    }

    fn truncate(&self, mut context: String) -> String {
        // Byte offset of the first character past the budget, if there is one.
        let Some((cut, _)) = context.char_indices().nth(self.max_context_chars) else {
            return context;
        };

        tracing::warn!(
            "Retrieved context is too large ({} bytes), truncating to {} characters",
            context.len(),
            self.max_context_chars
        );
        context.truncate(cut);
        context.push_str(&self.truncation_marker);
        context
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::from_settings(&RagSettings::default())
    }
}
