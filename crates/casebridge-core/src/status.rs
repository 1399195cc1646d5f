use crate::types::WorkflowCategory;

/// Map a remote tracker status string to a workflow category.
///
/// Exact, case-sensitive matches only. Statuses outside the table return
/// `None`, and callers must leave the record's workflow category unchanged;
/// an unmapped status is a defined no-op, not a failure.
pub fn translate(status: &str) -> Option<WorkflowCategory> {
    match status {
        "Active" => Some(WorkflowCategory::InProgress),
        "Resolved (Fixed)" => Some(WorkflowCategory::Done),
        "Closed (Fixed)" => Some(WorkflowCategory::Shipped),

        "Resolved (Not Reproducible)"
        | "Resolved (Duplicate)"
        | "Resolved (Postponed)"
        | "Resolved (Won't Fix)"
        | "Resolved (By Design)"
        | "Closed (Not Reproducible)"
        | "Closed (Duplicate)"
        | "Closed (Postponed)"
        | "Closed (Won't Fix)"
        | "Closed (By Design)" => Some(WorkflowCategory::WillNotImplement),

        _ => None,
    }
}
