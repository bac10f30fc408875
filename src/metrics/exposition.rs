use std::fmt::Write;
use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use super::MetricsSnapshot;
use crate::deployment::DeploymentInfo;
use crate::handlers::AppError;
use crate::AppState;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

// ─── GET /metrics ────────────────────────────────────────────────
// Text exposition of the registry, scraped by Prometheus-style collectors.

pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let snapshot = state.metrics.snapshot();
    let body = render(&snapshot, &state.deployment)?;

    Ok(([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response())
}

/// Formats a snapshot as `# HELP` / `# TYPE` / value blocks.
pub fn render(
    snapshot: &MetricsSnapshot,
    deployment: &DeploymentInfo,
) -> Result<String, std::fmt::Error> {
    let mut out = String::with_capacity(1024 + snapshot.routes.len() * 256);

    // ── Process-wide gauges and counters ────────────────────────
    block(
        &mut out,
        "app_uptime_seconds",
        "Application uptime in seconds",
        "gauge",
    )?;
    writeln!(out, "app_uptime_seconds {}\n", snapshot.uptime_secs())?;

    block(&mut out, "app_requests_total", "Total HTTP requests", "counter")?;
    writeln!(out, "app_requests_total {}\n", snapshot.total_requests)?;

    block(&mut out, "app_errors_total", "Total HTTP errors", "counter")?;
    writeln!(out, "app_errors_total {}\n", snapshot.total_errors)?;

    block(
        &mut out,
        "app_error_rate_percent",
        "Error rate percentage",
        "gauge",
    )?;
    // Bare 0 before the first request, two decimals afterwards.
    match snapshot.error_rate_centis() {
        Some(centis) => writeln!(out, "app_error_rate_percent {}\n", fixed2(centis))?,
        None => writeln!(out, "app_error_rate_percent 0\n")?,
    }

    block(&mut out, "app_info", "Application info", "gauge")?;
    writeln!(
        out,
        "app_info{{version=\"{}\",deployment_time=\"{}\"}} 1\n",
        escape_label(&deployment.version),
        escape_label(&deployment.deployment_time),
    )?;

    // ── Per-route series ────────────────────────────────────────
    for (key, stats) in &snapshot.routes {
        block(
            &mut out,
            "http_requests_total",
            "Total HTTP requests by route and status",
            "counter",
        )?;
        writeln!(
            out,
            "http_requests_total{{route=\"{}\"}} {}",
            escape_label(&key.to_string()),
            stats.count
        )?;
    }

    for (key, stats) in &snapshot.routes {
        block(
            &mut out,
            "http_request_duration_ms",
            "Average request duration in milliseconds",
            "gauge",
        )?;
        writeln!(
            out,
            "http_request_duration_ms{{route=\"{}\"}} {}",
            escape_label(&key.to_string()),
            fixed2(stats.avg_duration_centis())
        )?;
    }

    for (key, stats) in snapshot.routes.iter().filter(|(_, s)| s.errors > 0) {
        block(
            &mut out,
            "http_errors_total",
            "Total HTTP errors by route and status",
            "counter",
        )?;
        writeln!(
            out,
            "http_errors_total{{route=\"{}\"}} {}",
            escape_label(&key.to_string()),
            stats.errors
        )?;
    }

    Ok(out)
}

fn block(out: &mut String, name: &str, help: &str, kind: &str) -> std::fmt::Result {
    writeln!(out, "# HELP {name} {help}")?;
    writeln!(out, "# TYPE {name} {kind}")
}

/// Formats a value held in hundredths with exactly two decimals.
fn fixed2(centis: u64) -> String {
    format!("{}.{:02}", centis / 100, centis % 100)
}

/// Escapes `\`, `"` and newlines inside a label value.
fn escape_label(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}
