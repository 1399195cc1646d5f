use crate::attachment::AttachmentUpload;
use crate::case::{CaseFields, RemoteCase};
use crate::error::Result;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// The remote tracker client. Transport, authentication, and retries are its
/// concern; the sync core only sees cases and field payloads.
pub trait RemoteTracker: Send + Sync {
    /// Fetch a case by id, requesting exactly the fields the sync engine
    /// consumes. `Ok(None)` means no such case exists (including the
    /// deleted-on-remote-side case).
    fn search_case(&self, case_id: u64) -> Result<Option<RemoteCase>>;

    /// Create a new case; returns the authoritative case as stored remotely.
    fn create_case(&self, fields: &CaseFields, attachments: &[AttachmentUpload])
        -> Result<RemoteCase>;

    /// Update an existing case. `fields.case_id` must be set; an otherwise
    /// empty payload is valid and lands tag/attachment-only changes.
    fn update_case(&self, fields: &CaseFields, attachments: &[AttachmentUpload])
        -> Result<RemoteCase>;

    /// Projects available on the tracker, for installation-time selection.
    fn list_projects(&self) -> Result<Vec<Project>>;

    /// Human-facing URL for a case, stored on the cross-reference.
    fn case_url(&self, case_id: u64) -> String;
}

/// Materializes attachment bytes from the product-management system's
/// download URLs.
pub trait AttachmentFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

// ---------------------------------------------------------------------------
// HttpAttachmentFetcher
// ---------------------------------------------------------------------------

/// Plain HTTP GET fetcher backed by a blocking reqwest client.
#[derive(Debug, Default)]
pub struct HttpAttachmentFetcher {
    http: reqwest::blocking::Client,
}

impl HttpAttachmentFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttachmentFetcher for HttpAttachmentFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self
            .http
            .get(url)
            .send()?
            .error_for_status()?
            .bytes()?
            .to_vec();
        Ok(bytes)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
