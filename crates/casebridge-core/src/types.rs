use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// WorkflowCategory
// ---------------------------------------------------------------------------

/// The product-management system's fixed workflow status buckets. A remote
/// status with no corresponding category is represented as `None` by the
/// status translator, and callers leave the record untouched in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowCategory {
    InProgress,
    Done,
    Shipped,
    WillNotImplement,
}

impl WorkflowCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowCategory::InProgress => "in_progress",
            WorkflowCategory::Done => "done",
            WorkflowCategory::Shipped => "shipped",
            WorkflowCategory::WillNotImplement => "will_not_implement",
        }
    }
}

impl fmt::Display for WorkflowCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkflowCategory {
    type Err = crate::error::SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(WorkflowCategory::InProgress),
            "done" => Ok(WorkflowCategory::Done),
            "shipped" => Ok(WorkflowCategory::Shipped),
            "will_not_implement" => Ok(WorkflowCategory::WillNotImplement),
            _ => Err(crate::error::SyncError::InvalidCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// Whether a record is a feature or a requirement nested under one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Feature,
    Requirement,
}

impl RecordKind {
    /// Requirement reference numbers carry a second numeric segment
    /// (`APP-12-3`); feature reference numbers have one (`APP-12`).
    pub fn from_reference_num(reference_num: &str) -> RecordKind {
        let numeric_segments = reference_num
            .split('-')
            .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
            .count();
        if numeric_segments >= 2 {
            RecordKind::Requirement
        } else {
            RecordKind::Feature
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Feature => "feature",
            RecordKind::Requirement => "requirement",
        }
    }

    /// Plural form used in product-management API paths.
    pub fn as_path(self) -> &'static str {
        match self {
            RecordKind::Feature => "features",
            RecordKind::Requirement => "requirements",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordKind {
    type Err = crate::error::SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feature" | "features" => Ok(RecordKind::Feature),
            "requirement" | "requirements" => Ok(RecordKind::Requirement),
            _ => Err(crate::error::SyncError::InvalidKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
