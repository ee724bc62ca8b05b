//! Local photo cache port.

use async_trait::async_trait;

use super::entity::PhotoEntity;
use crate::domain::errors::StoreError;

/// Port for the "last known good" photo snapshot.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Discards every cached photo and stores `photos` in their place.
    ///
    /// Duplicate ids collapse, the last occurrence wins.
    async fn replace_all(&self, photos: Vec<PhotoEntity>) -> Result<(), StoreError>;

    /// Returns every cached photo, highest id first.
    async fn read_all(&self) -> Result<Vec<PhotoEntity>, StoreError>;
}

/// Collapses duplicate ids (last wins) and orders by id descending.
pub(super) fn normalize(photos: Vec<PhotoEntity>) -> Vec<PhotoEntity> {
    let by_id: std::collections::BTreeMap<u64, PhotoEntity> =
        photos.into_iter().map(|photo| (photo.id, photo)).collect();
    by_id.into_values().rev().collect()
}
