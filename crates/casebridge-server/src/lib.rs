pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use casebridge_core::config::IntegrationConfig;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(config: IntegrationConfig) -> Router {
    let app_state = state::AppState::new(config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::projects::health))
        .route("/api/projects", get(routes::projects::list_projects))
        .route("/api/sync", post(routes::sync::sync_record))
        .route("/webhook", post(routes::webhook::receive_webhook))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the casebridge HTTP server.
pub async fn serve(config: IntegrationConfig, port: u16) -> anyhow::Result<()> {
    let router = build_router(config);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("casebridge listening on {addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
