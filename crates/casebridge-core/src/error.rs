use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("remote tracker error: {0}")]
    RemoteApi(String),

    #[error("failed to fetch attachment '{file_name}': {reason}")]
    AttachmentFetch { file_name: String, reason: String },

    #[error("child record nesting exceeds depth {0}")]
    DepthLimit(usize),

    #[error("invalid workflow category: {0}")]
    InvalidCategory(String),

    #[error("invalid record kind: {0}")]
    InvalidKind(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
