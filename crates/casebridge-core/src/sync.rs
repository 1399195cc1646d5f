//! The sync engine: create-or-update of remote cases for records, and the
//! inbound webhook path that reflects case status back onto records.
//!
//! Both directions are synchronous and request-scoped. Any remote failure
//! aborts the current record's sync without rollback; a partially created
//! case is found again on the next attempt and updated, so redelivery of
//! the same event converges.

use crate::attachment;
use crate::case::{CaseFields, RemoteCase};
use crate::config::IntegrationConfig;
use crate::error::{Result, SyncError};
use crate::product::{CrossReference, ProductApi};
use crate::record::Record;
use crate::remote::{AttachmentFetcher, RemoteTracker};
use crate::resolver::CaseResolver;
use crate::{sanitize, status};
use std::collections::HashSet;

/// Requirements nest one level under features in practice; the cap only
/// guards against malformed payloads.
pub const MAX_CHILD_DEPTH: usize = 8;

// ---------------------------------------------------------------------------
// SyncEngine
// ---------------------------------------------------------------------------

pub struct SyncEngine<R, P, F> {
    remote: R,
    product: P,
    fetcher: F,
    config: IntegrationConfig,
}

impl<R, P, F> SyncEngine<R, P, F>
where
    R: RemoteTracker,
    P: ProductApi,
    F: AttachmentFetcher,
{
    pub fn new(config: IntegrationConfig, remote: R, product: P, fetcher: F) -> Self {
        Self {
            remote,
            product,
            fetcher,
            config,
        }
    }

    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    // ---------------------------------------------------------------------------
    // Outbound: record -> case
    // ---------------------------------------------------------------------------

    /// Create or update the remote case for `record`, recursively syncing
    /// its requirements as child cases. Returns the record's own case.
    pub fn sync(&self, record: &Record) -> Result<RemoteCase> {
        self.sync_with_parent(record, None, 0)
    }

    fn sync_with_parent(
        &self,
        record: &Record,
        parent_case_id: Option<u64>,
        depth: usize,
    ) -> Result<RemoteCase> {
        if depth > MAX_CHILD_DEPTH {
            return Err(SyncError::DepthLimit(depth));
        }

        let fields = CaseFields {
            title: Some(record.name.clone()),
            body: Some(sanitize::strip_markup(&record.description.body)),
            tags: record.tags.clone(),
            project_id: self.config.project_id,
            parent_id: parent_case_id,
            case_id: None,
        };

        let resolver =
            CaseResolver::new(&self.remote, &self.product, &self.config.integration_name);
        let existing = resolver.find_case_for(record)?;

        let (fields, existing_names) = match &existing {
            Some(case) => (fields.diff_against(case), case.attachment_names()),
            None => (fields, HashSet::new()),
        };

        let selected = attachment::reconcile(&existing_names, &record.description.attachments);
        let uploads = attachment::fetch_all(&self.fetcher, &selected)?;

        let case = if existing.is_some() {
            self.remote.update_case(&fields, &uploads)?
        } else {
            self.remote.create_case(&fields, &uploads)?
        };
        tracing::debug!(
            reference_num = %record.reference_num,
            case_id = case.id,
            updated = existing.is_some(),
            "synced record to case"
        );

        // Persisted only after the remote call succeeded, so a transport
        // failure never leaves a cross-reference pointing at nothing.
        self.product.create_cross_reference(
            record.kind(),
            &record.reference_num,
            &CrossReference {
                case_id: case.id,
                url: self.remote.case_url(case.id),
            },
        )?;

        for requirement in &record.requirements {
            self.sync_with_parent(requirement, Some(case.id), depth + 1)?;
        }

        Ok(case)
    }

    // ---------------------------------------------------------------------------
    // Inbound: case status -> record
    // ---------------------------------------------------------------------------

    /// Handle an inbound status-change notification for `case_id`. The case
    /// is re-fetched from the tracker; the webhook payload's own status is
    /// never trusted. Every expected miss returns `Ok(())` silently.
    pub fn handle_webhook(&self, case_id: u64) -> Result<()> {
        let Some(case) = self.remote.search_case(case_id)? else {
            tracing::info!(case_id, "webhook for unknown case; ignoring");
            return Ok(());
        };

        let resolver =
            CaseResolver::new(&self.remote, &self.product, &self.config.integration_name);
        let Some(resolved) = resolver.find_record_for(case.id)? else {
            tracing::info!(case_id, "no record linked to case; ignoring webhook");
            return Ok(());
        };

        let Some(category) = status::translate(&case.status) else {
            tracing::info!(
                case_id,
                status = %case.status,
                "unmapped remote status; leaving workflow category unchanged"
            );
            return Ok(());
        };

        // Direct overwrite: concurrent local edits are not reconciled and
        // the last writer wins.
        self.product
            .set_workflow_category(resolved.kind(), resolved.reference_num(), category)
    }
}
