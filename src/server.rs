use axum::{
    http::{header, HeaderValue},
    middleware as axum_mw,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::metrics::endpoint;
use crate::middleware::access_log;
use crate::AppState;

/// Builds the `Router`: a single `/metrics` route, 404 for everything else.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/metrics", get(endpoint::get_metrics))
        .fallback(endpoint::not_found)
        .with_state(state)
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn(access_log::access_log))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
