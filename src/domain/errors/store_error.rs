//! Local photo cache error types.

use thiserror::Error;

/// Photo cache error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("photo cache io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("photo cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("photo cache task failed: {0}")]
    Task(String),
}
