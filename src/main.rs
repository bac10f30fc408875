use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod deployment;
mod handlers;
mod metrics;
mod middleware;
mod server;

use crate::config::Config;
use crate::deployment::DeploymentInfo;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Version and deployment timestamp, captured once at startup.
    pub deployment: DeploymentInfo,

    /// Request metrics. The middleware writes, `/metrics` reads.
    pub metrics: Arc<metrics::MetricsRegistry>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 1. Load configuration ────────────────────────────────────
    let cfg = Config::from_env().context("invalid configuration")?;
    tracing::debug!(?cfg, "configuration loaded");

    // ── 2. Build shared state ────────────────────────────────────
    let state = Arc::new(AppState {
        deployment: DeploymentInfo::capture(cfg.app_version.clone()),
        metrics: Arc::new(metrics::MetricsRegistry::new()),
    });

    // ── 3. Build Axum router ─────────────────────────────────────
    let app = server::create_router(state.clone());

    // ── 4. Bind & serve ──────────────────────────────────────────
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        version = %state.deployment.version,
        deployed = %state.deployment.deployment_time,
        "Server running on port {}",
        cfg.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
