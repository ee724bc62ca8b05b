//! Photo repository with network-first loading and a single-page offline cache.

use std::sync::Arc;

use futures_util::{StreamExt, stream};
use tracing::{debug, info, warn};

use super::local::PhotoStore;
use super::mappers::{domain_to_entity, dto_to_domain, entity_to_domain};
use super::pexels::CuratedPhotoApi;
use crate::domain::entities::Photo;
use crate::domain::errors::{FetchError, StoreError};
use crate::domain::ports::{NetworkMonitor, PhotoRepository, PhotoStream};
use crate::domain::resource::Resource;

const OFFLINE_FROM_CACHE: &str = "Offline: Loaded from cache.";
const OFFLINE_NO_CACHE: &str = "Offline: No cached data available.";
const NO_CACHE_SUFFIX: &str = " No cached data available.";
const TRANSPORT_MESSAGE: &str = "Network Error: Check your connection.";

/// A failed online attempt and how to label a cache fallback for it.
#[derive(Debug)]
struct Failure {
    message: String,
    cache_note: &'static str,
}

impl Failure {
    fn unexpected(cause: impl std::fmt::Display) -> Self {
        Self {
            message: format!("An unexpected error occurred: {cause}"),
            cache_note: "Loaded from cache due to unexpected error.",
        }
    }
}

impl From<FetchError> for Failure {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::Http { .. } => Self {
                message: error.to_string(),
                cache_note: "Loaded from cache due to HTTP error.",
            },
            FetchError::Transport { .. } => Self {
                message: TRANSPORT_MESSAGE.to_string(),
                cache_note: "Loaded from cache as offline.",
            },
            FetchError::Unexpected { message } => Self::unexpected(message),
        }
    }
}

impl From<StoreError> for Failure {
    fn from(error: StoreError) -> Self {
        Self::unexpected(error)
    }
}

/// Progress of one `get_photos` stream.
enum Step {
    Start,
    Resolve,
    Fallback(Failure),
    Done,
}

/// Repository combining the curated API, the photo cache and the connectivity probe.
#[derive(Clone)]
pub struct PhotoRepositoryImpl {
    api: Arc<dyn CuratedPhotoApi>,
    store: Arc<dyn PhotoStore>,
    monitor: Arc<dyn NetworkMonitor>,
}

impl PhotoRepositoryImpl {
    /// Creates new repository.
    #[must_use]
    pub fn new(
        api: Arc<dyn CuratedPhotoApi>,
        store: Arc<dyn PhotoStore>,
        monitor: Arc<dyn NetworkMonitor>,
    ) -> Self {
        Self {
            api,
            store,
            monitor,
        }
    }

    async fn resolve(&self, page: u32, per_page: u32) -> (Resource<Vec<Photo>>, Step) {
        if !self.monitor.is_online().await {
            debug!(page, "Offline, serving photos from cache");
            let cached = self.read_cache().await;
            let result = if cached.is_empty() {
                Resource::error(OFFLINE_NO_CACHE)
            } else {
                Resource::success_with_message(cached, OFFLINE_FROM_CACHE)
            };
            return (result, Step::Done);
        }

        match self.fetch_and_cache(page, per_page).await {
            Ok(photos) => (Resource::success(photos), Step::Done),
            Err(failure) => {
                warn!(page, error = %failure.message, "Photo fetch failed, falling back to cache");
                (Resource::error(failure.message.clone()), Step::Fallback(failure))
            }
        }
    }

    async fn fetch_and_cache(&self, page: u32, per_page: u32) -> Result<Vec<Photo>, Failure> {
        let envelope = self.api.fetch_curated_page(page, per_page).await?;

        let photos: Vec<Photo> = envelope.photos.iter().map(dto_to_domain).collect();
        let entities = photos.iter().map(domain_to_entity).collect();

        self.store.replace_all(entities).await?;

        info!(page, count = photos.len(), "Fetched photo page and replaced cache");
        Ok(photos)
    }

    async fn fallback(&self, failure: Failure) -> Resource<Vec<Photo>> {
        let cached = self.read_cache().await;
        if cached.is_empty() {
            debug!("Cache fallback found nothing");
            Resource::error(format!("{}{NO_CACHE_SUFFIX}", failure.message))
        } else {
            debug!(count = cached.len(), "Serving cached photos after failure");
            Resource::success_with_message(cached, failure.cache_note)
        }
    }

    async fn read_cache(&self) -> Vec<Photo> {
        match self.store.read_all().await {
            Ok(entities) => entities.iter().map(entity_to_domain).collect(),
            Err(e) => {
                warn!(error = %e, "Failed to read photo cache");
                Vec::new()
            }
        }
    }
}

impl PhotoRepository for PhotoRepositoryImpl {
    fn get_photos(&self, page: u32, per_page: u32) -> PhotoStream {
        let repository = self.clone();

        stream::unfold(Step::Start, move |step| {
            let repository = repository.clone();
            async move {
                match step {
                    Step::Start => Some((Resource::Loading, Step::Resolve)),
                    Step::Resolve => Some(repository.resolve(page, per_page).await),
                    Step::Fallback(failure) => {
                        Some((repository.fallback(failure).await, Step::Done))
                    }
                    Step::Done => None,
                }
            }
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::FakeNetworkMonitor;
    use crate::infrastructure::local::{MemoryPhotoStore, PhotoEntity};
    use crate::infrastructure::pexels::{
        MockCuratedPhotoApi, PageEnvelope, PhotoDto, PhotoSrcDto,
    };
    use async_trait::async_trait;
    use mockall::predicate::eq;

    fn photo_dto(id: u64) -> PhotoDto {
        PhotoDto {
            id,
            width: 100,
            height: 100,
            url: String::new(),
            photographer: format!("Photographer{id}"),
            photographer_url: format!("purl{id}"),
            photographer_id: id,
            avg_color: "#FFF".to_string(),
            src: PhotoSrcDto {
                large: format!("url{id}"),
                ..PhotoSrcDto::default()
            },
            liked: false,
            alt: String::new(),
        }
    }

    fn photo(id: u64) -> Photo {
        Photo::new(id, format!("url{id}"), format!("Photographer{id}"), format!("purl{id}"), "#FFF")
    }

    fn envelope(page: u32, ids: &[u64]) -> PageEnvelope {
        PageEnvelope {
            page,
            per_page: 15,
            photos: ids.iter().copied().map(photo_dto).collect(),
            total_results: 100,
            next_page: None,
        }
    }

    fn repository(
        api: MockCuratedPhotoApi,
        store: Arc<dyn PhotoStore>,
        online: bool,
    ) -> PhotoRepositoryImpl {
        PhotoRepositoryImpl::new(
            Arc::new(api),
            store,
            Arc::new(FakeNetworkMonitor::new(online)),
        )
    }

    async fn cached(store: &MemoryPhotoStore) -> Vec<Photo> {
        store
            .read_all()
            .await
            .unwrap()
            .iter()
            .map(entity_to_domain)
            .collect()
    }

    struct BrokenStore;

    #[async_trait]
    impl PhotoStore for BrokenStore {
        async fn replace_all(&self, _photos: Vec<PhotoEntity>) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        async fn read_all(&self) -> Result<Vec<PhotoEntity>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk gone")))
        }
    }

    #[tokio::test]
    async fn test_online_success_emits_loading_then_photos_and_fills_cache() {
        let mut api = MockCuratedPhotoApi::new();
        api.expect_fetch_curated_page()
            .with(eq(1), eq(15))
            .times(1)
            .returning(|page, _| Ok(envelope(page, &[1, 2])));
        let store = Arc::new(MemoryPhotoStore::new());
        let repository = repository(api, store.clone(), true);

        let emissions: Vec<_> = repository.get_photos(1, 15).collect().await;

        assert_eq!(
            emissions,
            vec![Resource::Loading, Resource::success(vec![photo(1), photo(2)])]
        );
        assert_eq!(cached(&store).await, vec![photo(2), photo(1)]);
    }

    #[tokio::test]
    async fn test_success_replaces_cache_with_latest_page_only() {
        let mut api = MockCuratedPhotoApi::new();
        api.expect_fetch_curated_page()
            .returning(|page, _| match page {
                1 => Ok(envelope(1, &[1, 2])),
                _ => Ok(envelope(page, &[3])),
            });
        let store = Arc::new(MemoryPhotoStore::new());
        let repository = repository(api, store.clone(), true);

        let _: Vec<_> = repository.get_photos(1, 15).collect().await;
        let _: Vec<_> = repository.get_photos(2, 15).collect().await;

        assert_eq!(cached(&store).await, vec![photo(3)]);
    }

    #[tokio::test]
    async fn test_http_error_falls_back_to_cache() {
        let mut api = MockCuratedPhotoApi::new();
        api.expect_fetch_curated_page()
            .returning(|page, _| match page {
                1 => Ok(envelope(1, &[1])),
                _ => Err(FetchError::http(500, "Internal Server Error")),
            });
        let store = Arc::new(MemoryPhotoStore::new());
        let repository = repository(api, store.clone(), true);
        let _: Vec<_> = repository.get_photos(1, 15).collect().await;

        let emissions: Vec<_> = repository.get_photos(2, 15).collect().await;

        assert_eq!(
            emissions,
            vec![
                Resource::Loading,
                Resource::error("HTTP Error: 500 Internal Server Error"),
                Resource::success_with_message(
                    vec![photo(1)],
                    "Loaded from cache due to HTTP error."
                ),
            ]
        );
        assert_eq!(cached(&store).await, vec![photo(1)]);
    }

    #[tokio::test]
    async fn test_http_error_without_cache_emits_two_errors() {
        let mut api = MockCuratedPhotoApi::new();
        api.expect_fetch_curated_page()
            .returning(|_, _| Err(FetchError::http(401, "Unauthorized")));
        let repository = repository(api, Arc::new(MemoryPhotoStore::new()), true);

        let emissions: Vec<_> = repository.get_photos(1, 15).collect().await;

        assert_eq!(
            emissions,
            vec![
                Resource::Loading,
                Resource::error("HTTP Error: 401 Unauthorized"),
                Resource::error("HTTP Error: 401 Unauthorized No cached data available."),
            ]
        );
    }

    #[tokio::test]
    async fn test_transport_error_uses_network_message() {
        let mut api = MockCuratedPhotoApi::new();
        api.expect_fetch_curated_page()
            .returning(|_, _| Err(FetchError::transport("connection reset")));
        let store = Arc::new(MemoryPhotoStore::with_photos(vec![domain_to_entity(&photo(5))]));
        let repository = repository(api, store, true);

        let emissions: Vec<_> = repository.get_photos(3, 15).collect().await;

        assert_eq!(
            emissions,
            vec![
                Resource::Loading,
                Resource::error("Network Error: Check your connection."),
                Resource::success_with_message(vec![photo(5)], "Loaded from cache as offline."),
            ]
        );
    }

    #[tokio::test]
    async fn test_unexpected_error_prefixes_cause() {
        let mut api = MockCuratedPhotoApi::new();
        api.expect_fetch_curated_page()
            .returning(|_, _| Err(FetchError::unexpected("bad json")));
        let repository = repository(api, Arc::new(MemoryPhotoStore::new()), true);

        let emissions: Vec<_> = repository.get_photos(1, 15).collect().await;

        assert_eq!(
            emissions,
            vec![
                Resource::Loading,
                Resource::error("An unexpected error occurred: bad json"),
                Resource::error(
                    "An unexpected error occurred: bad json No cached data available."
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_cache_write_failure_is_unexpected_and_read_failure_is_empty() {
        let mut api = MockCuratedPhotoApi::new();
        api.expect_fetch_curated_page()
            .returning(|page, _| Ok(envelope(page, &[1])));
        let repository = repository(api, Arc::new(BrokenStore), true);

        let emissions: Vec<_> = repository.get_photos(1, 15).collect().await;

        assert_eq!(emissions.len(), 3);
        assert_eq!(
            emissions[1],
            Resource::error("An unexpected error occurred: photo cache io error: disk full")
        );
        assert!(matches!(
            &emissions[2],
            Resource::Error { message, .. } if message.ends_with("No cached data available.")
        ));
    }

    #[tokio::test]
    async fn test_offline_without_cache_emits_single_error() {
        let mut api = MockCuratedPhotoApi::new();
        api.expect_fetch_curated_page().never();
        let repository = repository(api, Arc::new(MemoryPhotoStore::new()), false);

        let emissions: Vec<_> = repository.get_photos(1, 15).collect().await;

        assert_eq!(
            emissions,
            vec![
                Resource::Loading,
                Resource::error("Offline: No cached data available.")
            ]
        );
    }

    #[tokio::test]
    async fn test_offline_with_cache_emits_cached_photos() {
        let mut api = MockCuratedPhotoApi::new();
        api.expect_fetch_curated_page().never();
        let store = Arc::new(MemoryPhotoStore::with_photos(vec![
            domain_to_entity(&photo(1)),
            domain_to_entity(&photo(2)),
        ]));
        let repository = repository(api, store, false);

        let emissions: Vec<_> = repository.get_photos(1, 15).collect().await;

        assert_eq!(
            emissions,
            vec![
                Resource::Loading,
                Resource::success_with_message(
                    vec![photo(2), photo(1)],
                    "Offline: Loaded from cache."
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_stream_is_lazy_until_polled() {
        let mut api = MockCuratedPhotoApi::new();
        api.expect_fetch_curated_page().never();
        let repository = repository(api, Arc::new(MemoryPhotoStore::new()), true);

        let mut stream = repository.get_photos(1, 15);
        let first = stream.next().await;

        assert_eq!(first, Some(Resource::Loading));
    }
}
