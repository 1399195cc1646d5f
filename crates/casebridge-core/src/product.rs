//! Product-management side: the cross-reference store and workflow patches.
//!
//! `ProductApi` is the seam the sync core consumes; `ProductClient` is the
//! reqwest-backed implementation against the product-management REST API.

use crate::error::Result;
use crate::types::{RecordKind, WorkflowCategory};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CrossReference
// ---------------------------------------------------------------------------

/// The durable link between a record and its remote case: the case id plus a
/// display URL. Keyed remotely by (integration name, record reference
/// number); written once per record on first successful case creation and
/// refreshed idempotently on later syncs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub case_id: u64,
    pub url: String,
}

// ---------------------------------------------------------------------------
// ResolvedRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub reference_num: String,
}

/// The record a reverse lookup resolved to, tagged with its kind so the
/// webhook handler can address the right API resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedRecord {
    Feature(RecordRef),
    Requirement(RecordRef),
}

impl ResolvedRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            ResolvedRecord::Feature(_) => RecordKind::Feature,
            ResolvedRecord::Requirement(_) => RecordKind::Requirement,
        }
    }

    pub fn reference_num(&self) -> &str {
        match self {
            ResolvedRecord::Feature(r) | ResolvedRecord::Requirement(r) => &r.reference_num,
        }
    }
}

// ---------------------------------------------------------------------------
// ProductApi
// ---------------------------------------------------------------------------

/// The product-management client seam. The sync core writes cross-references
/// and workflow categories through it and resolves inbound cases back to
/// records; everything else about the product API is out of scope.
pub trait ProductApi: Send + Sync {
    fn create_cross_reference(
        &self,
        kind: RecordKind,
        reference_num: &str,
        reference: &CrossReference,
    ) -> Result<()>;

    /// Reverse lookup by remote case id. `Ok(None)` is the expected miss:
    /// the tracker sends webhooks for cases this integration never created.
    fn find_record_for_case(&self, case_id: u64) -> Result<Option<ResolvedRecord>>;

    fn set_workflow_category(
        &self,
        kind: RecordKind,
        reference_num: &str,
        category: WorkflowCategory,
    ) -> Result<()>;
}

// ---------------------------------------------------------------------------
// ProductClient
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ProductClient {
    base_url: String,
    api_key: String,
    integration_name: String,
    http: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    feature: Option<WireRecordRef>,
    #[serde(default)]
    requirement: Option<WireRecordRef>,
}

#[derive(Debug, Deserialize)]
struct WireRecordRef {
    reference_num: String,
}

impl ProductClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        integration_name: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            integration_name: integration_name.into(),
            http: reqwest::blocking::Client::new(),
        }
    }
}

impl ProductApi for ProductClient {
    fn create_cross_reference(
        &self,
        kind: RecordKind,
        reference_num: &str,
        reference: &CrossReference,
    ) -> Result<()> {
        let url = format!(
            "{}/api/v1/{}/{}/integrations/{}/fields",
            self.base_url,
            kind.as_path(),
            reference_num,
            self.integration_name
        );
        let body = serde_json::json!({
            "integration_fields": [
                { "name": "number", "value": reference.case_id.to_string() },
                { "name": "url", "value": reference.url }
            ]
        });
        self.http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn find_record_for_case(&self, case_id: u64) -> Result<Option<ResolvedRecord>> {
        let url = format!(
            "{}/api/v1/integrations/{}/fields",
            self.base_url, self.integration_name
        );
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .query(&[("name", "number"), ("value", &case_id.to_string())])
            .send()?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let search: SearchResponse = response.error_for_status()?.json()?;
        if let Some(feature) = search.feature {
            Ok(Some(ResolvedRecord::Feature(RecordRef {
                reference_num: feature.reference_num,
            })))
        } else if let Some(requirement) = search.requirement {
            Ok(Some(ResolvedRecord::Requirement(RecordRef {
                reference_num: requirement.reference_num,
            })))
        } else {
            tracing::info!(case_id, "cross-reference resolved to an unhandled record type");
            Ok(None)
        }
    }

    fn set_workflow_category(
        &self,
        kind: RecordKind,
        reference_num: &str,
        category: WorkflowCategory,
    ) -> Result<()> {
        let url = format!(
            "{}/api/v1/{}/{}",
            self.base_url,
            kind.as_path(),
            reference_num
        );
        let mut body = serde_json::Map::new();
        body.insert(
            kind.as_str().to_string(),
            serde_json::json!({ "workflow_status": { "category": category } }),
        );
        self.http
            .put(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
