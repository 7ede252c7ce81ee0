use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use super::exposition::{self, CONTENT_TYPE};
use crate::AppState;

// ─── GET /metrics ────────────────────────────────────────────────

/// Renders a fresh snapshot per request. Always 200; before the first
/// cycle finishes the body is simply empty.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.registry.snapshot();
    let body = exposition::render(&snapshot);
    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body)
}

// ─── Fallback ────────────────────────────────────────────────────

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 Not Found\n")
}
