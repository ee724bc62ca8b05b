//! In-process photo cache.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::entity::PhotoEntity;
use super::store::PhotoStore;
use crate::domain::errors::StoreError;

/// Photo cache held in memory. Contents do not survive the process.
#[derive(Debug, Default)]
pub struct MemoryPhotoStore {
    photos: RwLock<BTreeMap<u64, PhotoEntity>>,
}

impl MemoryPhotoStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `photos`.
    #[must_use]
    pub fn with_photos(photos: Vec<PhotoEntity>) -> Self {
        Self {
            photos: RwLock::new(photos.into_iter().map(|p| (p.id, p)).collect()),
        }
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn replace_all(&self, photos: Vec<PhotoEntity>) -> Result<(), StoreError> {
        let fresh: BTreeMap<u64, PhotoEntity> = photos.into_iter().map(|p| (p.id, p)).collect();
        *self.photos.write() = fresh;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<PhotoEntity>, StoreError> {
        Ok(self.photos.read().values().rev().cloned().collect())
    }
}
