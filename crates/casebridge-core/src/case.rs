use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// RemoteCase
// ---------------------------------------------------------------------------

/// A case as reported by the remote tracker. `latest_text` is the body of
/// the most recent event; `attachments` holds the filenames accumulated over
/// the case's event history (empty when the case has no events).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCase {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub latest_text: Option<String>,
    pub status: String,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl RemoteCase {
    pub fn attachment_names(&self) -> HashSet<String> {
        self.attachments.iter().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// CaseFields
// ---------------------------------------------------------------------------

/// The outbound field set for a create or update call. Optional fields that
/// the differ drops are absent from the serialized payload entirely; tags
/// are always present so that clearing every tag on the record also clears
/// them on the case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub project_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<u64>,
}

impl CaseFields {
    /// Turn a full field set into an update payload against an existing
    /// case: drop the title and body when they already match, and carry the
    /// case's own id. An all-dropped payload is still a valid update; tag
    /// and attachment changes ride on it.
    pub fn diff_against(mut self, existing: &RemoteCase) -> CaseFields {
        if self.title.as_deref() == Some(existing.title.as_str()) {
            self.title = None;
        }
        if self.body.as_deref() == existing.latest_text.as_deref() {
            self.body = None;
        }
        self.case_id = Some(existing.id);
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
