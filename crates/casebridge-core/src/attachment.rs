use crate::error::{Result, SyncError};
use crate::remote::AttachmentFetcher;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Attachment / AttachmentUpload
// ---------------------------------------------------------------------------

/// An attachment referenced from a record's description. Identity is the
/// filename; content is fetched lazily from `download_url` just before
/// upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub download_url: String,
}

/// An attachment with its bytes materialized, ready to hand to the remote
/// tracker client.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Select the attachments that still need uploading: filename-based dedup
/// against the case's existing attachment names, record order preserved.
/// Two different files sharing a name are treated as the same attachment.
pub fn reconcile<'a>(
    existing: &HashSet<String>,
    attachments: &'a [Attachment],
) -> Vec<&'a Attachment> {
    attachments
        .iter()
        .filter(|a| !existing.contains(&a.file_name))
        .collect()
}

/// Fetch the bytes for every selected attachment. A single fetch failure
/// aborts the whole batch; a sync must never silently omit an attachment.
pub fn fetch_all(
    fetcher: &dyn AttachmentFetcher,
    attachments: &[&Attachment],
) -> Result<Vec<AttachmentUpload>> {
    let mut uploads = Vec::with_capacity(attachments.len());
    for attachment in attachments {
        let content =
            fetcher
                .fetch(&attachment.download_url)
                .map_err(|e| SyncError::AttachmentFetch {
                    file_name: attachment.file_name.clone(),
                    reason: e.to_string(),
                })?;
        uploads.push(AttachmentUpload {
            file_name: attachment.file_name.clone(),
            content,
        });
    }
    Ok(uploads)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
