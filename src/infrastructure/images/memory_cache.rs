//! In-memory LRU of decoded card images.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use image::DynamicImage;
use lru::LruCache;
use tokio::sync::Mutex;
use tracing::trace;

use crate::domain::entities::PhotoId;

/// Decoded images keyed by photo, least recently used evicted first.
pub struct MemoryImageCache {
    cache: Mutex<LruCache<PhotoId, Arc<DynamicImage>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryImageCache {
    /// Creates a cache holding at most `capacity` images (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the image and marks it most recently used.
    pub async fn get(&self, id: PhotoId) -> Option<Arc<DynamicImage>> {
        let found = self.cache.lock().await.get(&id).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(%id, "Memory image cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Stores an image, evicting the least recently used one when full.
    pub async fn put(&self, id: PhotoId, image: Arc<DynamicImage>) {
        if let Some((evicted, _)) = self.cache.lock().await.push(id, image)
            && evicted != id
        {
            trace!(%evicted, "Evicted image from memory cache");
        }
    }

    /// Returns `(hits, misses)` since creation.
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}
