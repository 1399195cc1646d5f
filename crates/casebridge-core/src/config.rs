use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

// ---------------------------------------------------------------------------
// IntegrationConfig
// ---------------------------------------------------------------------------

/// Per-integration credentials and wiring. One config describes one
/// product-management workspace linked to one tracker project; clients built
/// from it are scoped to a single synchronization session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Tracker base URL without the trailing slash,
    /// e.g. `https://bigco.fogbugz.com`.
    pub fogbugz_url: String,
    pub api_token: String,
    /// The tracker project new cases land in.
    pub project_id: u64,
    pub product_api_url: String,
    pub product_api_key: String,
    #[serde(default = "default_integration_name")]
    pub integration_name: String,
}

fn default_integration_name() -> String {
    "fogbugz".to_string()
}

impl IntegrationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: IntegrationConfig = serde_yaml::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config through a tempfile in the target directory so a
    /// crash mid-write never leaves a truncated file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let dir = path.parent().unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(data.as_bytes())?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("fogbugz_url", &self.fogbugz_url),
            ("product_api_url", &self.product_api_url),
        ] {
            if url.is_empty() {
                return Err(SyncError::InvalidConfig(format!("{name} must be set")));
            }
            if url.ends_with('/') {
                return Err(SyncError::InvalidConfig(format!(
                    "{name} must not have a trailing slash"
                )));
            }
        }
        if self.api_token.is_empty() {
            return Err(SyncError::InvalidConfig("api_token must be set".to_string()));
        }
        if self.product_api_key.is_empty() {
            return Err(SyncError::InvalidConfig(
                "product_api_key must be set".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
