use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use casebridge_core::SyncError;

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<SyncError>() {
            match e {
                SyncError::InvalidConfig(_)
                | SyncError::InvalidCategory(_)
                | SyncError::InvalidKind(_) => StatusCode::BAD_REQUEST,
                SyncError::DepthLimit(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SyncError::RemoteApi(_)
                | SyncError::AttachmentFetch { .. }
                | SyncError::Http(_) => StatusCode::BAD_GATEWAY,
                SyncError::Io(_) | SyncError::Yaml(_) | SyncError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
