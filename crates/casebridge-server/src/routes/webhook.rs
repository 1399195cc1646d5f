use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WebhookParams {
    pub case_number: u64,
}

/// POST /webhook?case_number=N: inbound status-change notification.
/// The tracker-side trigger is configured with `?case_number={CaseNumber}`
/// appended to this URL; everything else about the case is re-fetched from
/// the tracker rather than trusted from the delivery.
pub async fn receive_webhook(
    State(app): State<AppState>,
    Query(params): Query<WebhookParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let case_number = params.case_number;
    tokio::task::spawn_blocking(move || app.build_engine().handle_webhook(case_number))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(serde_json::json!({ "received": true })))
}
