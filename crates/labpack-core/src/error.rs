#[derive(Debug, thiserror::Error)]
pub enum LabpackError {
    #[error("failed to load regulatory table '{table}': {reason}")]
    DataLoad { table: String, reason: String },

    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("no regulatory entries for {0}")]
    UnknownCode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
