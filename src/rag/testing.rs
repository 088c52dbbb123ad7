//! In-memory stand-ins for the three external services.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::errors::ProviderError;
use crate::llm::{ChatProvider, ChatRequest, EmbeddingProvider};
use crate::search::{HybridQuery, SearchHit, SearchIndex};

fn unavailable(service: &'static str) -> ProviderError {
    ProviderError::Status {
        service,
        status: 503,
        body: "overloaded".to_string(),
    }
}

pub struct StubEmbedder {
    vector: Option<Vec<f32>>,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn returning(vector: Vec<f32>) -> Self {
        Self {
            vector: Some(vector),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            vector: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-embedding"
    }

    async fn embed(&self, _input: &str) -> Result<Vec<f32>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.vector
            .clone()
            .ok_or_else(|| unavailable("embedding service"))
    }
}

pub struct StubIndex {
    hits: Option<Vec<SearchHit>>,
    queries: Mutex<Vec<HybridQuery>>,
}

impl StubIndex {
    pub fn with_hits(hits: Vec<Value>) -> Self {
        Self {
            hits: Some(
                hits.into_iter()
                    .filter_map(|hit| hit.as_object().cloned())
                    .collect(),
            ),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            hits: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn last_query(&self) -> Option<HybridQuery> {
        self.queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SearchIndex for StubIndex {
    fn name(&self) -> &str {
        "stub"
    }

    async fn hybrid_search(&self, query: HybridQuery) -> Result<Vec<SearchHit>, ProviderError> {
        self.queries.lock().unwrap().push(query);
        self.hits.clone().ok_or_else(|| unavailable("search service"))
    }
}

pub struct StubChat {
    answer: Option<String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubChat {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatProvider for StubChat {
    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-chat"
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request);
        self.answer
            .clone()
            .ok_or_else(|| unavailable("generation service"))
    }
}
