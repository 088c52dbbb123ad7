use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::ApiError;
use crate::core::logging::log_interaction;
use crate::rag::AnswerOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub request_id: Uuid,
    pub answer: String,
    pub context: String,
    pub outcome: AnswerOutcome,
    pub latency_ms: u64,
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<QueryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let request_id = Uuid::new_v4();
    let started = Instant::now();
    let result = state.pipeline.answer(&payload.query).await;
    let latency = started.elapsed();

    log_interaction(&payload.query, latency, &result.context, &result.answer);

    Ok(Json(QueryResponse {
        request_id,
        answer: result.answer,
        context: result.context,
        outcome: result.outcome,
        latency_ms: latency.as_millis() as u64,
    }))
}
