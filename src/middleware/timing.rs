use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use crate::metrics::{MetricsRegistry, RouteKey};

/// Tower-compatible middleware that times every request and records it in the
/// registry under `(method, route, status)`.
///
/// The route is the matched template when the router matched one, otherwise
/// the raw path (static files and 404s). The request is recorded once the
/// response head is produced, before the body is streamed. If the client goes
/// away before the response head is produced this future is dropped and
/// nothing is recorded.
pub async fn track_metrics(
    State(metrics): State<Arc<MetricsRegistry>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let status = response.status().as_u16();
    tracing::debug!(%method, %route, status, elapsed_ms, "request recorded");

    metrics.record(RouteKey::new(method, route, status), elapsed_ms);

    response
}
