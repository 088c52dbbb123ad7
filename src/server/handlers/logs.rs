use std::fs;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::core::errors::ApiError;
use crate::state::AppState;

/// Log file names, newest first.
pub async fn list_logs(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let mut logs = Vec::new();
    if let Ok(entries) = fs::read_dir(&state.paths.log_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if !is_log_file(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                logs.push((
                    name.to_string(),
                    entry.metadata().and_then(|m| m.modified()).ok(),
                ));
            }
        }
    }

    logs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let names: Vec<String> = logs.into_iter().map(|(name, _)| name).collect();
    Ok(Json(names))
}

pub async fn read_log(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let safe_name = sanitize_log_filename(&filename)
        .ok_or_else(|| ApiError::BadRequest("Invalid log filename".to_string()))?;
    let path = state.paths.log_dir.join(safe_name);

    if !path.is_file() || !is_log_file(&path) {
        return Err(ApiError::NotFound("Log file not found".to_string()));
    }

    fs::read_to_string(path).map_err(ApiError::internal)
}

/// The daily appender names files `server.log.YYYY-MM-DD`.
fn is_log_file(path: &FsPath) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.ends_with(".log") || name.contains(".log."))
        .unwrap_or(false)
}

/// Accepts a bare file name only.
fn sanitize_log_filename(filename: &str) -> Option<&str> {
    if filename.contains('\\') || filename.contains("..") {
        return None;
    }
    let base = FsPath::new(filename).file_name().and_then(|n| n.to_str())?;
    (base == filename).then_some(base)
}
