//! Card image error types.

use thiserror::Error;

/// Failure to produce a decoded card image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// Download failed or the server answered with a non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// The bytes are not an image format we can read.
    #[error("decode error: {0}")]
    Decode(String),

    /// Disk cache I/O failed.
    #[error("io error: {0}")]
    Io(String),
}

/// Result alias for image operations.
pub type ImageResult<T> = Result<T, ImageError>;
