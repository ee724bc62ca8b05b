//! Background card image loading.
//!
//! Lookups go memory, then disk, then network. Requests are queued newest first so the cards the
//! user just scrolled to win over ones already left behind, and downloads are capped by a
//! semaphore.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;
use image::imageops::FilterType;
use parking_lot::Mutex;
use reqwest::Client;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use super::disk_cache::DiskImageCache;
use super::memory_cache::MemoryImageCache;
use crate::domain::entities::PhotoId;
use crate::domain::errors::{ImageError, ImageResult};
use crate::domain::ports::{ImageLoadedEvent, ImageLoaderPort};
use crate::infrastructure::config::ImagesConfig;
use crate::infrastructure::pexels::USER_AGENT;

/// Decoded images wider than this are scaled down to fit `MAX_DECODED_WIDTH` x `MAX_DECODED_HEIGHT`.
pub const MAX_DECODED_WIDTH: u32 = 400;
/// See [`MAX_DECODED_WIDTH`].
pub const MAX_DECODED_HEIGHT: u32 = 300;

#[derive(Debug)]
struct LoadRequest {
    id: PhotoId,
    url: String,
}

/// Loads card images on a worker task and reports each outcome as an [`ImageLoadedEvent`].
pub struct ImageLoader {
    requests: mpsc::UnboundedSender<LoadRequest>,
    worker: JoinHandle<()>,
}

impl ImageLoader {
    /// Spawns the loader worker. Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        config: &ImagesConfig,
        timeout: Duration,
        disk: Arc<DiskImageCache>,
        events: mpsc::UnboundedSender<ImageLoadedEvent>,
    ) -> ImageResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ImageError::Network(format!("failed to create HTTP client: {e}")))?;

        let fetcher = Arc::new(Fetcher {
            memory: MemoryImageCache::new(config.memory_cache_size),
            disk,
            http,
        });
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_downloads.max(1)));
        let (requests, rx) = mpsc::unbounded_channel();

        let worker = tokio::spawn(run_worker(rx, fetcher, semaphore, events));
        Ok(Self { requests, worker })
    }
}

impl ImageLoaderPort for ImageLoader {
    fn load_async(&self, id: PhotoId, url: String) {
        if let Err(e) = self.requests.send(LoadRequest { id, url }) {
            error!(%id, error = %e, "Image loader worker is gone");
        }
    }
}

impl Drop for ImageLoader {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run_worker(
    mut requests: mpsc::UnboundedReceiver<LoadRequest>,
    fetcher: Arc<Fetcher>,
    semaphore: Arc<Semaphore>,
    events: mpsc::UnboundedSender<ImageLoadedEvent>,
) {
    let mut queue: VecDeque<LoadRequest> = VecDeque::new();
    let in_flight: Arc<Mutex<HashSet<PhotoId>>> = Arc::default();

    loop {
        tokio::select! {
            request = requests.recv() => {
                let Some(request) = request else { break };
                let duplicate = in_flight.lock().contains(&request.id)
                    || queue.iter().any(|queued| queued.id == request.id);
                if duplicate {
                    trace!(id = %request.id, "Image already requested");
                } else {
                    queue.push_front(request);
                }
            }
            Ok(permit) = semaphore.clone().acquire_owned(), if !queue.is_empty() => {
                if let Some(LoadRequest { id, url }) = queue.pop_front() {
                    in_flight.lock().insert(id);
                    let fetcher = fetcher.clone();
                    let events = events.clone();
                    let in_flight = in_flight.clone();

                    tokio::spawn(async move {
                        let result = fetcher.load(id, &url).await.map_err(|e| e.to_string());
                        in_flight.lock().remove(&id);
                        drop(permit);

                        if let Err(e) = &result {
                            warn!(%id, error = %e, "Image load failed");
                        }
                        let _ = events.send(ImageLoadedEvent { id, result });
                    });
                }
            }
        }
    }
}

struct Fetcher {
    memory: MemoryImageCache,
    disk: Arc<DiskImageCache>,
    http: Client,
}

impl Fetcher {
    async fn load(&self, id: PhotoId, url: &str) -> ImageResult<Arc<DynamicImage>> {
        if let Some(image) = self.memory.get(id).await {
            return Ok(image);
        }

        if let Some(bytes) = self.disk.get_bytes(id).await {
            match decode(bytes).await {
                Ok(image) => {
                    self.memory.put(id, image.clone()).await;
                    debug!(%id, source = "disk", "Image loaded");
                    return Ok(image);
                }
                Err(e) => warn!(%id, error = %e, "Discarding undecodable cached image"),
            }
        }

        let bytes = self.download(url).await?;
        let image = decode(bytes.clone()).await?;
        self.memory.put(id, image.clone()).await;
        if let Err(e) = self.disk.put_bytes(id, bytes).await {
            warn!(%id, error = %e, "Failed to cache image on disk");
        }

        let (hits, misses) = self.memory.stats();
        debug!(%id, source = "network", hits, misses, "Image loaded");
        Ok(image)
    }

    async fn download(&self, url: &str) -> ImageResult<Vec<u8>> {
        trace!(url, "Downloading image");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ImageError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Network(format!("HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageError::Network(format!("failed to read body: {e}")))?;
        Ok(bytes.to_vec())
    }
}

async fn decode(bytes: Vec<u8>) -> ImageResult<Arc<DynamicImage>> {
    tokio::task::spawn_blocking(move || {
        let image =
            image::load_from_memory(&bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
        if image.width() > MAX_DECODED_WIDTH {
            Ok(image.resize(MAX_DECODED_WIDTH, MAX_DECODED_HEIGHT, FilterType::Lanczos3))
        } else {
            Ok(image)
        }
    })
    .await
    .map_err(|e| ImageError::Decode(format!("decode task failed: {e}")))?
    .map(Arc::new)
}
