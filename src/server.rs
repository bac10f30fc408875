use axum::{middleware as axum_mw, routing::get, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::STATIC_DIR;
use crate::handlers;
use crate::metrics::exposition;
use crate::middleware::timing;
use crate::AppState;

/// Builds the full Axum `Router` with all routes, middleware, and static serving.
pub fn create_router(state: Arc<AppState>) -> Router {
    create_router_with_static(state, STATIC_DIR)
}

fn create_router_with_static(state: Arc<AppState>, static_dir: &str) -> Router {
    let metrics = state.metrics.clone();

    Router::new()
        // ── Status page & API ───────────────────────────────────
        .route("/", get(handlers::status::index))
        .route("/api/info", get(handlers::status::info))
        .route("/health", get(handlers::status::health))
        // ── Metrics ─────────────────────────────────────────────
        .route("/metrics", get(exposition::get_metrics))
        // ── Provide shared state to all routes above ────────────
        .with_state(state)
        // ── Everything else comes from the public/ directory ────
        .fallback_service(ServeDir::new(static_dir))
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn_with_state(metrics, timing::track_metrics))
        .layer(TraceLayer::new_for_http())
}
