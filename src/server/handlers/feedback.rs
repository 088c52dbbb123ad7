use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::core::logging::log_feedback;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Positive,
    Negative,
}

impl Verdict {
    fn label(self) -> &'static str {
        match self {
            Verdict::Positive => "Positive",
            Verdict::Negative => "Negative",
        }
    }

    fn acknowledgement(self) -> &'static str {
        match self {
            Verdict::Positive => "Thanks for the feedback!",
            Verdict::Negative => "Thank you. This data will be used to improve the model.",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub query: String,
    pub verdict: Verdict,
}

pub async fn submit_feedback(
    Json(payload): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    log_feedback(&payload.query, payload.verdict.label());

    Ok(Json(json!({
        "status": "success",
        "feedback": payload.verdict.label(),
        "message": payload.verdict.acknowledgement()
    })))
}
