use axum::{extract::State, response::Html, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::deployment::DeploymentInfo;
use crate::AppState;

// ─── Response types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    #[serde(flatten)]
    pub deployment: DeploymentInfo,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ─── GET / ───────────────────────────────────────────────────────

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(status_page(&state.deployment))
}

fn status_page(deployment: &DeploymentInfo) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>CI/CD Pipeline App</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }}
        .container {{ max-width: 600px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }}
        .status {{ color: #28a745; font-weight: bold; }}
        .info {{ background: #e9ecef; padding: 15px; border-radius: 5px; margin: 20px 0; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>🚀 CI/CD Pipeline App</h1>
        <p class="status">Status: Running</p>
        <div class="info">
            <p><strong>Version:</strong> {version}</p>
            <p><strong>Deployed:</strong> {deployed}</p>
        </div>
        <p>Application successfully deployed and running!</p>
    </div>
</body>
</html>
"#,
        version = deployment.version,
        deployed = deployment.deployment_time,
    )
}

// ─── GET /api/info ───────────────────────────────────────────────

pub async fn info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    Json(InfoResponse {
        deployment: state.deployment.clone(),
        status: "running",
    })
}

// ─── GET /health ─────────────────────────────────────────────────
// Liveness only; no dependencies are checked.

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_page_embeds_version_and_deployment_time() {
        let deployment = DeploymentInfo {
            version: "4.5.6".into(),
            deployment_time: "2026-10-19T08:00:00.000Z".into(),
        };
        let html = status_page(&deployment);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>CI/CD Pipeline App</title>"));
        assert!(html.contains("<strong>Version:</strong> 4.5.6"));
        assert!(html.contains("<strong>Deployed:</strong> 2026-10-19T08:00:00.000Z"));
    }

    #[test]
    fn info_body_keeps_field_names() {
        let body = InfoResponse {
            deployment: DeploymentInfo {
                version: "1.0.0".into(),
                deployment_time: "2026-10-19T08:00:00.000Z".into(),
            },
            status: "running",
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"version":"1.0.0","deploymentTime":"2026-10-19T08:00:00.000Z","status":"running"}"#
        );
    }
}
