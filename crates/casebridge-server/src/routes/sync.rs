use axum::{extract::State, Json};
use casebridge_core::record::Record;
use casebridge_core::remote::RemoteTracker;

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/sync: create or update the remote case for a record, and
/// recursively for its requirements. Invoked by the product-management
/// system on record create/update.
pub async fn sync_record(
    State(app): State<AppState>,
    Json(record): Json<Record>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (case, url) = tokio::task::spawn_blocking(move || {
        let engine = app.build_engine();
        let case = engine.sync(&record)?;
        let url = engine.remote().case_url(case.id);
        Ok::<_, casebridge_core::SyncError>((case, url))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({
        "case_id": case.id,
        "status": case.status,
        "url": url,
    })))
}
