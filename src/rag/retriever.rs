use std::sync::Arc;

use serde_json::Value;

use super::error::RetrievalError;
use super::types::Passage;
use crate::search::{HybridQuery, SearchHit, SearchIndex};

pub const MISSING_FIELD_PLACEHOLDER: &str = "N/A";

const TITLE_FIELD: &str = "title";
const CHUNK_FIELD: &str = "chunk";

/// Fetches candidate passages from the hybrid index.
#[derive(Clone)]
pub struct PassageRetriever {
    index: Arc<dyn SearchIndex>,
    top_k: usize,
    vector_field: String,
}

impl PassageRetriever {
    pub fn new(
        index: Arc<dyn SearchIndex>,
        top_k: usize,
        vector_field: impl Into<String>,
    ) -> Self {
        Self {
            index,
            top_k,
            vector_field: vector_field.into(),
        }
    }

    pub async fn retrieve(
        &self,
        query: &str,
        vector: Vec<f32>,
    ) -> Result<Vec<Passage>, RetrievalError> {
        let request = HybridQuery {
            text: query.to_string(),
            vector,
            k: self.top_k,
            vector_field: self.vector_field.clone(),
            select: vec![TITLE_FIELD.to_string(), CHUNK_FIELD.to_string()],
        };

        let hits = self.index.hybrid_search(request).await.map_err(|err| {
            tracing::warn!("An error occurred during search ({}): {}", self.index.name(), err);
            RetrievalError::from(err)
        })?;

        let passages: Vec<Passage> = hits.iter().filter_map(passage_from_hit).collect();
        tracing::debug!(hits = hits.len(), passages = passages.len(), "Search completed");
        Ok(passages)
    }
}

/// Missing fields become the placeholder; a hit with neither field is dropped.
fn passage_from_hit(hit: &SearchHit) -> Option<Passage> {
    let title = field_text(hit, TITLE_FIELD);
    let chunk = field_text(hit, CHUNK_FIELD);
    if title.is_none() && chunk.is_none() {
        return None;
    }

    Some(Passage {
        title: title.unwrap_or_else(|| MISSING_FIELD_PLACEHOLDER.to_string()),
        chunk: chunk.unwrap_or_else(|| MISSING_FIELD_PLACEHOLDER.to_string()),
    })
}

fn field_text(hit: &SearchHit, field: &str) -> Option<String> {
    match hit.get(field)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
