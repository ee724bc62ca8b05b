//! Application layer with use cases.

/// Use case implementations.
pub mod use_cases;

pub use use_cases::{DEFAULT_PER_PAGE, FIRST_PAGE, GetPhotosUseCase, MAX_PER_PAGE};
