use std::sync::OnceLock;
use std::time::Duration;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::config::AppPaths;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Number of context characters kept in an interaction record.
const CONTEXT_PREVIEW_CHARS: usize = 100;

pub fn init(paths: &AppPaths) {
    let log_dir = &paths.log_dir;
    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, "server.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}

/// Records one answered query for monitoring.
pub fn log_interaction(query: &str, latency: Duration, context: &str, response: &str) {
    tracing::info!(
        target: "interaction",
        "Query: {} | Latency: {:.2}s | Context: {}... | Response: {}",
        query,
        latency.as_secs_f64(),
        preview(context, CONTEXT_PREVIEW_CHARS),
        response
    );
}

pub fn log_feedback(query: &str, verdict: &str) {
    tracing::info!(target: "interaction", "Feedback for '{}': {}", query, verdict);
}

/// First `max_chars` characters of `text`, never splitting a character.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
