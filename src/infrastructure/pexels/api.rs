//! Curated photo API port.

use async_trait::async_trait;

use super::dto::PageEnvelope;
use crate::domain::errors::FetchError;

/// Port for fetching one page of the curated feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CuratedPhotoApi: Send + Sync {
    /// Fetches `page` with `per_page` photos.
    async fn fetch_curated_page(&self, page: u32, per_page: u32)
    -> Result<PageEnvelope, FetchError>;
}
