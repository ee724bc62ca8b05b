//! Remote fetch error types.

use thiserror::Error;

/// Failure of a single page fetch against the photo API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP Error: {status} {reason}")]
    Http { status: u16, reason: String },

    /// The request never produced a response (DNS, connect, timeout, reset).
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// Anything else, including undecodable bodies.
    #[error("{message}")]
    Unexpected { message: String },
}

impl FetchError {
    /// Creates an HTTP status error.
    #[must_use]
    pub fn http(status: u16, reason: impl Into<String>) -> Self {
        Self::Http {
            status,
            reason: reason.into(),
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}
