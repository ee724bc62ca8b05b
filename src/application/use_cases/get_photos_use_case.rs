//! Page fetch use case.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{PhotoRepository, PhotoStream};

/// First page number of the curated feed.
pub const FIRST_PAGE: u32 = 1;

/// Page size used when the caller does not choose one.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Largest page size the curated endpoint serves.
pub const MAX_PER_PAGE: u32 = 80;

/// Fetches one page of curated photos.
#[derive(Clone)]
pub struct GetPhotosUseCase {
    repository: Arc<dyn PhotoRepository>,
}

impl GetPhotosUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(repository: Arc<dyn PhotoRepository>) -> Self {
        Self { repository }
    }

    /// Returns the emission stream for `page`.
    #[must_use]
    pub fn execute(&self, page: u32, per_page: u32) -> PhotoStream {
        debug!(page, per_page, "Requesting photo page");
        self.repository.get_photos(page, per_page)
    }

    /// Returns the emission stream for the first page at the default size.
    #[must_use]
    pub fn execute_default(&self) -> PhotoStream {
        self.execute(FIRST_PAGE, DEFAULT_PER_PAGE)
    }
}
