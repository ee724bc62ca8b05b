//! Raw image bytes on disk, kept across sessions under a size cap.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use tokio::fs;
use tracing::{debug, trace, warn};

use crate::domain::entities::PhotoId;
use crate::domain::errors::{ImageError, ImageResult};
use crate::infrastructure::atomic_file::write_atomic;

const FILE_EXTENSION: &str = "img";

/// Downloaded image files named `<photo id>.img`.
pub struct DiskImageCache {
    dir: PathBuf,
    max_size: u64,
    current_size: AtomicU64,
}

impl DiskImageCache {
    /// Opens (or creates) the cache in `dir`, trimming it to `max_size` bytes.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created or listed.
    pub async fn new(dir: PathBuf, max_size: u64) -> ImageResult<Self> {
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ImageError::Io(format!("Failed to create cache dir: {e}")))?;

        let total: u64 = cached_files(&dir)
            .await?
            .iter()
            .map(|file| file.size)
            .sum();

        let cache = Self {
            dir,
            max_size,
            current_size: AtomicU64::new(total),
        };
        cache.cleanup_if_needed().await;
        Ok(cache)
    }

    /// Opens the cache under the platform cache directory (`~/.cache/photogrid/images`).
    ///
    /// # Errors
    /// Returns error if the directory cannot be created or listed.
    pub async fn default_location(max_size: u64) -> ImageResult<Self> {
        let dir = directories::ProjectDirs::from("com", "devomo", "photogrid").map_or_else(
            || std::env::temp_dir().join("photogrid").join("images"),
            |dirs| dirs.cache_dir().join("images"),
        );
        Self::new(dir, max_size).await
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the tracked size of all cached files in bytes.
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size.load(Ordering::Relaxed)
    }

    fn path_for(&self, id: PhotoId) -> PathBuf {
        self.dir.join(format!("{id}.{FILE_EXTENSION}"))
    }

    /// Returns the stored bytes, or `None` on a miss.
    pub async fn get_bytes(&self, id: PhotoId) -> Option<Vec<u8>> {
        match fs::read(self.path_for(id)).await {
            Ok(bytes) => {
                trace!(%id, size = bytes.len(), "Disk image cache hit");
                Some(bytes)
            }
            Err(_) => {
                trace!(%id, "Disk image cache miss");
                None
            }
        }
    }

    /// Stores `bytes` for `id`, replacing any previous file, then enforces the size cap.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub async fn put_bytes(&self, id: PhotoId, bytes: Vec<u8>) -> ImageResult<()> {
        let path = self.path_for(id);
        let previous = fs::metadata(&path).await.map(|meta| meta.len()).unwrap_or(0);
        let size = bytes.len() as u64;

        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&target, &bytes))
            .await
            .map_err(|e| ImageError::Io(format!("Write task failed: {e}")))?
            .map_err(|e| ImageError::Io(format!("Failed to write cache file: {e}")))?;

        self.current_size
            .fetch_sub(previous.min(self.current_size()), Ordering::Relaxed);
        self.current_size.fetch_add(size, Ordering::Relaxed);
        debug!(%id, path = %path.display(), size, "Stored image on disk");

        self.cleanup_if_needed().await;
        Ok(())
    }

    /// Removes the least recently used files until the cache is 10% under its cap.
    async fn cleanup_if_needed(&self) {
        let current = self.current_size();
        if current <= self.max_size {
            return;
        }

        let Ok(mut files) = cached_files(&self.dir).await else {
            return;
        };
        files.sort_by_key(|file| file.last_used);

        let target = current - self.max_size + self.max_size / 10;
        let mut freed = 0u64;
        for file in files {
            if freed >= target {
                break;
            }
            match fs::remove_file(&file.path).await {
                Ok(()) => freed += file.size,
                Err(e) => {
                    warn!(path = %file.path.display(), error = %e, "Failed to remove cached image");
                }
            }
        }

        self.current_size
            .fetch_sub(freed.min(self.current_size()), Ordering::Relaxed);
        debug!(freed, max_size = self.max_size, "Trimmed disk image cache");
    }
}

struct CachedFile {
    path: PathBuf,
    size: u64,
    last_used: SystemTime,
}

async fn cached_files(dir: &Path) -> ImageResult<Vec<CachedFile>> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| ImageError::Io(format!("Failed to read cache dir: {e}")))?;

    let mut files = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != FILE_EXTENSION) {
            continue;
        }
        if let Ok(meta) = entry.metadata().await {
            let last_used = meta
                .accessed()
                .or_else(|_| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            files.push(CachedFile {
                path,
                size: meta.len(),
                last_used,
            });
        }
    }
    Ok(files)
}
