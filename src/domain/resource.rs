//! Result envelope emitted by data sources while a request progresses.

/// One emission of a repository request.
///
/// A request yields `Loading` first, then a terminal `Success` or `Error`. An `Error` may be
/// followed by one more terminal value produced by a cache fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<T> {
    /// The request has started.
    Loading,
    /// Data is available. `message` explains where it came from when it is not fresh.
    Success {
        /// Payload.
        data: T,
        /// Optional note, e.g. that the data was served from cache.
        message: Option<String>,
    },
    /// The request failed.
    Error {
        /// Human-readable failure description.
        message: String,
        /// Stale data, if any was available alongside the failure.
        data: Option<T>,
    },
}

impl<T> Resource<T> {
    /// Creates a fresh success.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self::Success {
            data,
            message: None,
        }
    }

    /// Creates a success annotated with a message.
    #[must_use]
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::Success {
            data,
            message: Some(message.into()),
        }
    }

    /// Creates an error without data.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            data: None,
        }
    }

    /// Returns true for `Success` and `Error`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}
