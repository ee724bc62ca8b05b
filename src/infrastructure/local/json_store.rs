//! Disk-backed photo cache that persists the last fetched page across sessions.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use super::entity::PhotoEntity;
use super::store::{PhotoStore, normalize};
use crate::domain::errors::StoreError;
use crate::infrastructure::atomic_file::write_atomic;

const SNAPSHOT_FILE_NAME: &str = "photos.json";

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    saved_at: DateTime<Utc>,
    photos: Vec<PhotoEntity>,
}

/// Photo cache stored as a single JSON snapshot file.
pub struct JsonPhotoStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonPhotoStore {
    /// Creates a store inside `cache_dir`.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn new(cache_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&cache_dir).await?;
        Ok(Self {
            path: cache_dir.join(SNAPSHOT_FILE_NAME),
            write_lock: Mutex::new(()),
        })
    }

    /// Creates a store in the default location (~/.cache/photogrid/).
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn default_location() -> Result<Self, StoreError> {
        Self::new(default_cache_dir()).await
    }

    /// Returns the snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns when the snapshot was last written, if one exists.
    ///
    /// # Errors
    /// Returns error if the snapshot exists but cannot be read.
    pub async fn saved_at(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.load().await?.map(|snapshot| snapshot.saved_at))
    }

    async fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        if !fs::try_exists(&self.path).await? {
            trace!(path = %self.path.display(), "No photo snapshot on disk");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

#[async_trait]
impl PhotoStore for JsonPhotoStore {
    async fn replace_all(&self, photos: Vec<PhotoEntity>) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            saved_at: Utc::now(),
            photos: normalize(photos),
        };
        let content = serde_json::to_vec_pretty(&snapshot)?;
        let count = snapshot.photos.len();

        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &content))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))??;

        debug!(path = %self.path.display(), count, "Replaced photo snapshot");
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<PhotoEntity>, StoreError> {
        let photos = self
            .load()
            .await?
            .map(|snapshot| normalize(snapshot.photos))
            .unwrap_or_default();
        trace!(count = photos.len(), "Read photo snapshot");
        Ok(photos)
    }
}

/// Returns the default cache directory path.
fn default_cache_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "devomo", "photogrid").map_or_else(
        || std::env::temp_dir().join("photogrid").join("cache"),
        |dirs| dirs.cache_dir().to_path_buf(),
    )
}
