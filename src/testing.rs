//! Throwaway HTTP server for exercising the service clients.

use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub uri: String,
    pub api_key: Option<String>,
    pub body: Value,
}

pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockServer {
    /// Answers every request with `status` and `body`, recording what it received.
    pub async fn start(status: StatusCode, body: Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = requests.clone();

        let app = Router::new().fallback(
            move |uri: Uri, headers: HeaderMap, Json(payload): Json<Value>| {
                let captured = captured.clone();
                let body = body.clone();
                async move {
                    captured.lock().unwrap().push(CapturedRequest {
                        uri: uri.to_string(),
                        api_key: headers
                            .get("api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                        body: payload,
                    });
                    (status, Json(body))
                }
            },
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// An address nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
