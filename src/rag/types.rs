use serde::{Deserialize, Serialize};

/// A retrieved candidate passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub title: String,
    pub chunk: String,
}

impl Passage {
    pub fn new(title: impl Into<String>, chunk: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            chunk: chunk.into(),
        }
    }

    /// Two-line record used inside the model context.
    pub fn render(&self) -> String {
        format!("Title: {}\nChunk: {}", self.title, self.chunk)
    }
}

/// Why the pipeline answered with the fixed refusal instead of asking the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbstentionReason {
    /// The query could not be embedded.
    NoVector { reason: String },
    /// The search service failed.
    SearchFailed { reason: String },
    /// The search succeeded but returned nothing.
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerOutcome {
    Answered,
    SynthesisFailed { reason: String },
    Abstained { reason: AbstentionReason },
}

/// Answer text plus the context it was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
    pub answer: String,
    pub context: String,
    pub outcome: AnswerOutcome,
}

impl AnswerResult {
    pub fn is_abstention(&self) -> bool {
        matches!(self.outcome, AnswerOutcome::Abstained { .. })
    }

    /// The `(answer, context)` pair consumed by the chat front end.
    pub fn into_pair(self) -> (String, String) {
        (self.answer, self.context)
    }
}
