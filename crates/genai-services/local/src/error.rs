// error.rs — Error types for the local permission store.

use std::path::PathBuf;

use genai_permission::ServiceError;
use thiserror::Error;

/// Errors that can occur while loading or saving the store file.
#[derive(Debug, Error)]
pub enum LocalStoreError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The store file is not valid JSON for this format.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Storage failures reach callers as internal service errors.
impl From<LocalStoreError> for ServiceError {
    fn from(e: LocalStoreError) -> Self {
        ServiceError::Internal(e.to_string())
    }
}
