use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

/// Failure talking to one of the external services (embeddings, search, chat).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },
    #[error("{service} returned an unexpected payload: {detail}")]
    InvalidResponse {
        service: &'static str,
        detail: String,
    },
}

impl ProviderError {
    pub fn transport(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| ProviderError::Transport { service, source }
    }

    pub fn invalid(service: &'static str, detail: impl Into<String>) -> Self {
        ProviderError::InvalidResponse {
            service,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: String, reason: String },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing(_) | ConfigError::Invalid { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            ConfigError::Io(_) | ConfigError::Parse(_) => ApiError::internal(err),
        }
    }
}
