use thiserror::Error;

/// Errors that can occur while saving or loading studio documents
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to access document: {0}")]
    Io(#[from] std::io::Error),

    #[error("No document directory available")]
    MissingDirectory,
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Top-level error for the studio crate
#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Failed to load font: {0}")]
    FontLoad(String),
}
