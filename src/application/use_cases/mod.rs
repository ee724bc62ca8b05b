//! Use case implementations.

mod get_photos_use_case;

pub use get_photos_use_case::{DEFAULT_PER_PAGE, FIRST_PAGE, GetPhotosUseCase, MAX_PER_PAGE};
