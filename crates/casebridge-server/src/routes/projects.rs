use axum::{extract::State, Json};
use casebridge_core::remote::RemoteTracker;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/projects: tracker projects, for installation-time selection of
/// the project new cases should land in.
pub async fn list_projects(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let projects = tokio::task::spawn_blocking(move || {
        let engine = app.build_engine();
        engine.remote().list_projects()
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(serde_json::json!({ "projects": projects })))
}

/// GET /api/health: liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
