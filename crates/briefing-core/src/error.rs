use thiserror::Error;

#[derive(Debug, Error)]
pub enum BriefingError {
    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("invalid storage key '{0}': must be lowercase alphanumeric with '_' or '-'")]
    InvalidStorageKey(String),

    #[error("invalid step: {0} (expected 1..=8)")]
    InvalidStep(String),

    #[error("invalid transition from {from} via {action}: {reason}")]
    InvalidTransition {
        from: String,
        action: String,
        reason: String,
    },

    #[error("field '{field}' does not belong to step '{step}'")]
    UnknownField { step: String, field: String },

    #[error("invalid value for '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("{0} is required")]
    Required(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("share failed: {0}")]
    Share(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BriefingError>;
