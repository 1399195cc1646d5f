//! Cross-system identity resolution.
//!
//! Both lookup directions treat a miss as `Ok(None)` rather than an error:
//! a record without a stored case number simply has no case yet, and a
//! webhook for a case this integration never created is ignored upstream.

use crate::case::RemoteCase;
use crate::error::Result;
use crate::product::{ProductApi, ResolvedRecord};
use crate::record::Record;
use crate::remote::RemoteTracker;

pub struct CaseResolver<'a> {
    tracker: &'a dyn RemoteTracker,
    product: &'a dyn ProductApi,
    integration_name: &'a str,
}

impl<'a> CaseResolver<'a> {
    pub fn new(
        tracker: &'a dyn RemoteTracker,
        product: &'a dyn ProductApi,
        integration_name: &'a str,
    ) -> Self {
        Self {
            tracker,
            product,
            integration_name,
        }
    }

    /// The remote case already linked to `record`, if one exists.
    ///
    /// A stored cross-reference pointing at a case the tracker no longer
    /// knows (deleted remotely) also resolves to `None`: the next sync
    /// recreates the case and refreshes the cross-reference, which keeps
    /// the integration convergent at the cost of a new case id.
    pub fn find_case_for(&self, record: &Record) -> Result<Option<RemoteCase>> {
        let Some(case_id) = record.stored_case_id(self.integration_name) else {
            return Ok(None);
        };
        match self.tracker.search_case(case_id)? {
            Some(case) => Ok(Some(case)),
            None => {
                tracing::info!(
                    case_id,
                    reference_num = %record.reference_num,
                    "linked case no longer exists remotely; a new case will be created"
                );
                Ok(None)
            }
        }
    }

    /// The record that owns `case_id`, via the reverse cross-reference
    /// lookup. `Ok(None)` when nothing is linked.
    pub fn find_record_for(&self, case_id: u64) -> Result<Option<ResolvedRecord>> {
        self.product.find_record_for_case(case_id)
    }
}
