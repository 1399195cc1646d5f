use crate::attachment::Attachment;
use crate::types::RecordKind;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Description
// ---------------------------------------------------------------------------

/// A record's rich-text description: an HTML body plus the attachments
/// referenced from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

// ---------------------------------------------------------------------------
// IntegrationField
// ---------------------------------------------------------------------------

/// A stored cross-reference value as delivered by the product-management
/// system alongside the record. The `number` field of our integration holds
/// the linked remote case id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationField {
    pub integration: String,
    pub name: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A feature or requirement owned by the product-management system. The
/// adapter only reads it; requirements nest one level under a feature and
/// arrive inline in the `requirements` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub reference_num: String,
    pub name: String,
    #[serde(default)]
    pub description: Description,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<Record>,
    #[serde(default)]
    pub integration_fields: Vec<IntegrationField>,
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        RecordKind::from_reference_num(&self.reference_num)
    }

    /// The remote case id previously persisted for this record under the
    /// given integration, if any. Absence means no case exists yet.
    pub fn stored_case_id(&self, integration: &str) -> Option<u64> {
        self.integration_fields
            .iter()
            .find(|f| f.integration == integration && f.name == "number")
            .and_then(|f| f.value.parse().ok())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
