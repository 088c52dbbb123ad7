use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{config, feedback, health, logs, query};
use crate::state::AppState;

/// Creates the application router.
///
/// Routes: health, question answering, feedback, redacted config and log files.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = build_cors_layer(&state.server.allowed_origins);
    Router::new()
        .route("/health", get(health::health))
        .route("/api/query", post(query::ask))
        .route("/api/feedback", post(feedback::submit_feedback))
        .route("/api/config", get(config::get_config))
        .route("/api/logs", get(logs::list_logs))
        .route("/api/logs/:filename", get(logs::read_log))
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}

fn build_cors_layer(configured: &[String]) -> CorsLayer {
    let origins = resolve_allowed_origins(configured)
        .into_iter()
        .filter_map(|origin| HeaderValue::from_str(&origin).ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
}

fn resolve_allowed_origins(configured: &[String]) -> Vec<String> {
    let origins = configured
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();

    if origins.is_empty() {
        return default_local_origins();
    }

    origins
}

fn default_local_origins() -> Vec<String> {
    vec![
        "http://localhost".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://localhost:8501".to_string(),
        "http://127.0.0.1".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
        "http://127.0.0.1:8501".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::core::config::{AppPaths, RagSettings, ServerSettings};
    use crate::rag::testing::{StubChat, StubEmbedder, StubIndex};
    use crate::rag::RagPipeline;

    fn app(dir: &std::path::Path, index: StubIndex, chat: Arc<StubChat>) -> Router {
        let pipeline = RagPipeline::new(
            Arc::new(StubEmbedder::returning(vec![0.5])),
            Arc::new(index),
            chat,
            &RagSettings::default(),
        );
        let state = AppState::from_parts(
            Arc::new(AppPaths::from_root(dir)),
            pipeline,
            ServerSettings::default(),
        );
        router(state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn configured_origins_replace_defaults() {
        assert_eq!(
            resolve_allowed_origins(&[" https://legal.example ".to_string(), String::new()]),
            vec!["https://legal.example".to_string()]
        );
        assert_eq!(resolve_allowed_origins(&[]), default_local_origins());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), StubIndex::with_hits(vec![]), Arc::new(StubChat::answering("")));

        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn query_returns_answer_and_context() {
        let dir = tempfile::tempdir().unwrap();
        let chat = Arc::new(StubChat::answering("Contract Law 101"));
        let app = app(
            dir.path(),
            StubIndex::with_hits(vec![
                json!({ "title": "Contract Law 101", "chunk": "Section 1 defines..." }),
            ]),
            chat.clone(),
        );

        let (status, body) = send(
            app,
            post_json("/api/query", json!({ "query": "What is the title of the book?" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "Contract Law 101");
        assert_eq!(body["context"], "Title: Contract Law 101\nChunk: Section 1 defines...");
        assert_eq!(body["outcome"]["kind"], "answered");
        assert!(body["request_id"].is_string());
        assert_eq!(chat.calls(), 1);
    }

    #[tokio::test]
    async fn query_without_matches_abstains() {
        let dir = tempfile::tempdir().unwrap();
        let chat = Arc::new(StubChat::answering("unused"));
        let app = app(dir.path(), StubIndex::with_hits(vec![]), chat.clone());

        let (status, body) =
            send(app, post_json("/api/query", json!({ "query": "Anything?" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "I cannot find the answer in the provided documents.");
        assert_eq!(body["context"], "");
        assert_eq!(body["outcome"]["kind"], "abstained");
        assert_eq!(body["outcome"]["reason"]["kind"], "no_matches");
        assert_eq!(chat.calls(), 0);
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let chat = Arc::new(StubChat::answering("unused"));
        let app = app(dir.path(), StubIndex::with_hits(vec![]), chat.clone());

        let (status, body) = send(app, post_json("/api/query", json!({ "query": "   " }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "query must not be empty");
        assert_eq!(chat.calls(), 0);
    }

    #[tokio::test]
    async fn feedback_is_acknowledged() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), StubIndex::with_hits(vec![]), Arc::new(StubChat::answering("")));

        let (status, body) = send(
            app.clone(),
            post_json("/api/feedback", json!({ "query": "q", "verdict": "negative" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["feedback"], "Negative");
        assert_eq!(
            body["message"],
            "Thank you. This data will be used to improve the model."
        );

        let (status, _) = send(
            app,
            post_json("/api/feedback", json!({ "query": "q", "verdict": "meh" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn config_endpoint_redacts_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("secrets.yaml"), "search:\n  api_key: s3cret\n").unwrap();
        let app = app(dir.path(), StubIndex::with_hits(vec![]), Arc::new(StubChat::answering("")));

        let request = Request::get("/api/config").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["search"]["api_key"], "****");
        assert_eq!(body["rag"]["max_context_chars"], 10_000);
    }

    #[tokio::test]
    async fn logs_can_be_listed_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), StubIndex::with_hits(vec![]), Arc::new(StubChat::answering("")));
        fs::write(dir.path().join("logs").join("server.log"), "Query: q").unwrap();

        let request = Request::get("/api/logs").body(Body::empty()).unwrap();
        let (status, body) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["server.log"]));

        let request = Request::get("/api/logs/server.log").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Query: q");

        let request = Request::get("/api/logs/missing.log").body(Body::empty()).unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
