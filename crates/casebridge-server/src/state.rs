use casebridge_core::config::IntegrationConfig;
use casebridge_core::fogbugz::FogBugzClient;
use casebridge_core::product::ProductClient;
use casebridge_core::remote::HttpAttachmentFetcher;
use casebridge_core::sync::SyncEngine;
use std::sync::Arc;

/// The engine wired to the real HTTP collaborators.
pub type HttpSyncEngine = SyncEngine<FogBugzClient, ProductClient, HttpAttachmentFetcher>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<IntegrationConfig>,
}

impl AppState {
    pub fn new(config: IntegrationConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Build a session-scoped engine from the integration credentials.
    /// Clients live for one event, which keeps concurrent integration
    /// instances isolated; the blocking reqwest clients inside also must
    /// not be driven on the async runtime, so call this from
    /// `spawn_blocking`.
    pub fn build_engine(&self) -> HttpSyncEngine {
        let remote = FogBugzClient::new(
            self.config.fogbugz_url.clone(),
            self.config.api_token.clone(),
        );
        let product = ProductClient::new(
            self.config.product_api_url.clone(),
            self.config.product_api_key.clone(),
            self.config.integration_name.clone(),
        );
        SyncEngine::new(
            (*self.config).clone(),
            remote,
            product,
            HttpAttachmentFetcher::new(),
        )
    }
}
