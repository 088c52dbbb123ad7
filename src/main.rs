use std::env;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use legal_assistant::core::config::AppPaths;
use legal_assistant::core::logging;
use legal_assistant::server;
use legal_assistant::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let paths = Arc::new(AppPaths::new());
    logging::init(&paths);

    let state = AppState::initialize(paths).context("Failed to initialize application state")?;

    let port = env::var("PORT")
        .ok()
        .and_then(|val| val.parse::<u16>().ok())
        .unwrap_or(0);
    let bind_addr = format!("{}:{}", state.server.host, port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;

    println!("LEGAL_RAG_PORT={}", addr.port());
    tracing::info!("Listening on {}", addr);

    let app: Router = server::router::router(state);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
