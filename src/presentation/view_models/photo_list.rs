//! Paginated photo list view model.
//!
//! The view model owns one worker task. Every cursor and list mutation happens on that task:
//! page requests arrive over a channel, and fetch emissions and connectivity changes are
//! multiplexed with them in a single `select!` loop. Results are published through `watch`
//! channels so the UI always reads the latest value. Dropping the view model aborts the worker,
//! cancelling in-flight fetches and the connectivity subscription.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::stream::{BoxStream, SelectAll};
use futures_util::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::application::{FIRST_PAGE, GetPhotosUseCase};
use crate::domain::entities::{Photo, PhotoId};
use crate::domain::ports::NetworkMonitor;
use crate::domain::resource::Resource;

/// UI-facing state of the photo list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoListState {
    /// First page is loading.
    Loading,
    /// Every photo accumulated so far.
    Success(Vec<Photo>),
    /// Latest request failed.
    Error(String),
}

/// Pagination bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    /// Last page whose fresh photos were appended.
    pub current_page: u32,
    /// A request is in flight.
    pub is_loading_more: bool,
    /// An empty page after the first was received.
    pub is_last_page: bool,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            current_page: FIRST_PAGE,
            is_loading_more: false,
            is_last_page: false,
        }
    }
}

/// An admitted page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    id: u64,
    /// Requested page.
    pub page: u32,
}

/// Cursor plus accumulated photos, free of any async machinery.
#[derive(Debug, Default)]
pub struct PhotoListModel {
    cursor: PaginationCursor,
    photos: Vec<Photo>,
    seen: HashSet<PhotoId>,
    next_request_id: u64,
    active_request: Option<u64>,
}

impl PhotoListModel {
    /// Creates a model positioned on the first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cursor.
    #[must_use]
    pub const fn cursor(&self) -> PaginationCursor {
        self.cursor
    }

    /// Returns the accumulated photos.
    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Page that `load_next_page` asks for.
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.cursor.current_page + 1
    }

    /// Admits a request for `page` (the current page when `None`).
    ///
    /// Returns `None` while a request is in flight or after the last page.
    pub fn begin(&mut self, page: Option<u32>) -> Option<PageRequest> {
        if self.cursor.is_loading_more || self.cursor.is_last_page {
            return None;
        }

        let request = PageRequest {
            id: self.next_request_id,
            page: page.unwrap_or(self.cursor.current_page),
        };
        self.next_request_id += 1;
        self.active_request = Some(request.id);
        self.cursor.is_loading_more = true;
        Some(request)
    }

    /// Applies one emission of `request`. Returns the state to publish, if it changed.
    pub fn apply(
        &mut self,
        request: PageRequest,
        emission: Resource<Vec<Photo>>,
    ) -> Option<PhotoListState> {
        if emission.is_terminal() && self.active_request == Some(request.id) {
            self.cursor.is_loading_more = false;
        }

        match emission {
            Resource::Loading => None,
            Resource::Success {
                data,
                message: None,
            } => {
                if data.is_empty() && request.page > FIRST_PAGE {
                    debug!(page = request.page, "Empty page, no more photos");
                    self.cursor.is_last_page = true;
                    return None;
                }
                self.merge(data);
                self.cursor.current_page = request.page;
                Some(PhotoListState::Success(self.photos.clone()))
            }
            Resource::Success {
                data,
                message: Some(note),
            } => {
                debug!(page = request.page, count = data.len(), %note, "Cached photos received");
                self.merge(data);
                Some(PhotoListState::Success(self.photos.clone()))
            }
            Resource::Error { message, data } => {
                if let Some(stale) = data {
                    self.merge(stale);
                }
                Some(PhotoListState::Error(message))
            }
        }
    }

    fn merge(&mut self, photos: Vec<Photo>) {
        for photo in photos {
            if self.seen.insert(photo.id()) {
                self.photos.push(photo);
            }
        }
    }
}

#[derive(Debug)]
enum Command {
    RequestPage(Option<u32>),
    LoadNextPage,
}

type Emissions = BoxStream<'static, (PageRequest, Resource<Vec<Photo>>)>;

struct Worker {
    use_case: GetPhotosUseCase,
    per_page: u32,
    model: PhotoListModel,
    in_flight: SelectAll<Emissions>,
    state_tx: watch::Sender<PhotoListState>,
    online_tx: watch::Sender<bool>,
    cursor_tx: watch::Sender<PaginationCursor>,
}

impl Worker {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut online_feed: BoxStream<'static, bool>,
    ) {
        debug!("Photo list worker started");
        self.request_page(None);
        let mut feed_open = true;

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },

                Some((request, emission)) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.apply(request, emission);
                }

                status = online_feed.next(), if feed_open => match status {
                    Some(online) => {
                        trace!(online, "Connectivity update");
                        self.online_tx.send_replace(online);
                    }
                    None => feed_open = false,
                },
            }
        }
        debug!("Photo list worker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::RequestPage(page) => self.request_page(page),
            Command::LoadNextPage => self.request_page(Some(self.model.next_page())),
        }
    }

    fn request_page(&mut self, page: Option<u32>) {
        let Some(request) = self.model.begin(page) else {
            trace!(?page, "Page request ignored while busy or exhausted");
            return;
        };

        info!(page = request.page, "Loading photo page");
        if request.page == FIRST_PAGE {
            self.state_tx.send_replace(PhotoListState::Loading);
        }
        self.publish_cursor();

        let emissions = self
            .use_case
            .execute(request.page, self.per_page)
            .map(move |emission| (request, emission))
            .boxed();
        self.in_flight.push(emissions);
    }

    fn apply(&mut self, request: PageRequest, emission: Resource<Vec<Photo>>) {
        if let Some(state) = self.model.apply(request, emission) {
            self.state_tx.send_replace(state);
        }
        self.publish_cursor();
    }

    fn publish_cursor(&self) {
        let cursor = self.model.cursor();
        self.cursor_tx.send_if_modified(|current| {
            if *current == cursor {
                false
            } else {
                *current = cursor;
                true
            }
        });
    }
}

/// Drives paging for the photo grid and mirrors connectivity.
pub struct PhotoListViewModel {
    command_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<PhotoListState>,
    online_rx: watch::Receiver<bool>,
    cursor_rx: watch::Receiver<PaginationCursor>,
    worker: JoinHandle<()>,
}

impl PhotoListViewModel {
    /// Creates the view model, requests the first page and subscribes to connectivity changes.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(
        use_case: GetPhotosUseCase,
        network_monitor: Arc<dyn NetworkMonitor>,
        per_page: u32,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(PhotoListState::Loading);
        let (online_tx, online_rx) = watch::channel(true);
        let (cursor_tx, cursor_rx) = watch::channel(PaginationCursor::default());

        let worker = Worker {
            use_case,
            per_page,
            model: PhotoListModel::new(),
            in_flight: SelectAll::new(),
            state_tx,
            online_tx,
            cursor_tx,
        };
        let worker = tokio::spawn(worker.run(command_rx, network_monitor.status_changes()));

        Self {
            command_tx,
            state_rx,
            online_rx,
            cursor_rx,
            worker,
        }
    }

    /// Requests `page`, or the current page when `None`.
    pub fn request_page(&self, page: Option<u32>) {
        let _ = self.command_tx.send(Command::RequestPage(page));
    }

    /// Requests the page after the current one.
    pub fn load_next_page(&self) {
        let _ = self.command_tx.send(Command::LoadNextPage);
    }

    /// Returns the current list state.
    #[must_use]
    pub fn state(&self) -> PhotoListState {
        self.state_rx.borrow().clone()
    }

    /// Returns a receiver of list state updates.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<PhotoListState> {
        self.state_rx.clone()
    }

    /// Returns the mirrored connectivity status.
    #[must_use]
    pub fn is_online(&self) -> bool {
        *self.online_rx.borrow()
    }

    /// Returns a receiver of connectivity updates.
    #[must_use]
    pub fn subscribe_online(&self) -> watch::Receiver<bool> {
        self.online_rx.clone()
    }

    /// Returns the pagination cursor.
    #[must_use]
    pub fn cursor(&self) -> PaginationCursor {
        *self.cursor_rx.borrow()
    }

    /// Returns a receiver of cursor updates.
    #[must_use]
    pub fn subscribe_cursor(&self) -> watch::Receiver<PaginationCursor> {
        self.cursor_rx.clone()
    }
}

impl Drop for PhotoListViewModel {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::time::timeout;

    use crate::domain::ports::mocks::{FakeNetworkMonitor, ScriptedPhotoRepository};

    const WAIT: Duration = Duration::from_secs(2);

    fn photo(id: u64) -> Photo {
        Photo::new(id, format!("url{id}"), format!("Photographer{id}"), format!("purl{id}"), "#FFF")
    }

    fn request(model: &mut PhotoListModel, page: u32) -> PageRequest {
        model.begin(Some(page)).expect("request should be admitted")
    }

    fn view_model(
        repository: &Arc<ScriptedPhotoRepository>,
        monitor: &Arc<FakeNetworkMonitor>,
    ) -> PhotoListViewModel {
        let use_case = GetPhotosUseCase::new(repository.clone());
        PhotoListViewModel::new(use_case, monitor.clone(), 15)
    }

    async fn wait_for_state(vm: &PhotoListViewModel, expected: PhotoListState) {
        let mut rx = vm.subscribe_state();
        timeout(WAIT, rx.wait_for(|state| *state == expected))
            .await
            .expect("state not reached in time")
            .expect("view model worker stopped");
    }

    async fn wait_for_cursor(vm: &PhotoListViewModel, done: impl FnMut(&PaginationCursor) -> bool) {
        let mut rx = vm.subscribe_cursor();
        timeout(WAIT, rx.wait_for(done))
            .await
            .expect("cursor not reached in time")
            .expect("view model worker stopped");
    }

    #[test]
    fn test_empty_later_page_marks_last_page() {
        let mut model = PhotoListModel::new();
        let first = request(&mut model, 1);
        model.apply(first, Resource::success(vec![photo(1)]));

        let second = request(&mut model, 2);
        let published = model.apply(second, Resource::success(Vec::new()));

        assert!(published.is_none());
        assert!(model.cursor().is_last_page);
        assert!(!model.cursor().is_loading_more);
        assert_eq!(model.cursor().current_page, 1);
        assert_eq!(model.photos(), &[photo(1)]);
        assert!(model.begin(None).is_none());
    }

    #[test]
    fn test_empty_first_page_is_a_success() {
        let mut model = PhotoListModel::new();
        let first = request(&mut model, 1);

        let published = model.apply(first, Resource::success(Vec::new()));

        assert_eq!(published, Some(PhotoListState::Success(Vec::new())));
        assert!(!model.cursor().is_last_page);
    }

    #[test]
    fn test_request_while_loading_is_ignored() {
        let mut model = PhotoListModel::new();
        let first = request(&mut model, 1);

        assert!(model.begin(None).is_none());
        assert!(model.begin(Some(2)).is_none());

        model.apply(first, Resource::Loading);
        assert!(model.cursor().is_loading_more);
    }

    #[test]
    fn test_pages_accumulate_and_advance() {
        let mut model = PhotoListModel::new();
        let first = request(&mut model, 1);
        model.apply(first, Resource::success(vec![photo(1), photo(2)]));

        let next = model.next_page();
        let second = request(&mut model, next);
        let published = model.apply(second, Resource::success(vec![photo(3)]));

        assert_eq!(
            published,
            Some(PhotoListState::Success(vec![photo(1), photo(2), photo(3)]))
        );
        assert_eq!(model.cursor().current_page, 2);
        assert_eq!(model.next_page(), 3);
    }

    #[test]
    fn test_error_then_cache_fallback_keeps_list() {
        let mut model = PhotoListModel::new();
        let first = request(&mut model, 1);
        model.apply(first, Resource::success(vec![photo(1)]));

        let second = request(&mut model, 2);
        let error = model.apply(
            second,
            Resource::error("HTTP Error: 500 Internal Server Error"),
        );
        let fallback = model.apply(
            second,
            Resource::success_with_message(vec![photo(1)], "Loaded from cache due to HTTP error."),
        );

        assert_eq!(
            error,
            Some(PhotoListState::Error(
                "HTTP Error: 500 Internal Server Error".to_string()
            ))
        );
        assert_eq!(fallback, Some(PhotoListState::Success(vec![photo(1)])));
        assert_eq!(model.photos(), &[photo(1)]);
        assert_eq!(model.cursor().current_page, 1);
        assert!(!model.cursor().is_loading_more);
    }

    #[test]
    fn test_error_on_later_page_leaves_list_untouched() {
        let mut model = PhotoListModel::new();
        let first = request(&mut model, 1);
        model.apply(first, Resource::success(vec![photo(1)]));

        let second = request(&mut model, 2);
        model.apply(second, Resource::error("Network Error: Check your connection."));

        assert_eq!(model.photos(), &[photo(1)]);
        assert!(!model.cursor().is_loading_more);
        assert!(!model.cursor().is_last_page);
    }

    #[test]
    fn test_error_with_stale_data_merges_it() {
        let mut model = PhotoListModel::new();
        let first = request(&mut model, 1);
        model.apply(first, Resource::success(vec![photo(1)]));

        let second = request(&mut model, 2);
        let published = model.apply(
            second,
            Resource::Error {
                message: "timeout".to_string(),
                data: Some(vec![photo(1), photo(4)]),
            },
        );

        assert_eq!(published, Some(PhotoListState::Error("timeout".to_string())));
        assert_eq!(model.photos(), &[photo(1), photo(4)]);
        assert_eq!(model.cursor().current_page, 1);
    }

    #[test]
    fn test_stale_fallback_does_not_release_newer_request() {
        let mut model = PhotoListModel::new();
        let first = request(&mut model, 1);
        model.apply(first, Resource::error("boom"));

        let retry = request(&mut model, 1);
        model.apply(
            first,
            Resource::success_with_message(vec![photo(9)], "Loaded from cache as offline."),
        );

        assert!(model.cursor().is_loading_more);
        model.apply(retry, Resource::success(vec![photo(1)]));
        assert!(!model.cursor().is_loading_more);
        assert_eq!(model.photos(), &[photo(9), photo(1)]);
    }

    #[tokio::test]
    async fn test_first_page_success_is_published() {
        let repository = Arc::new(
            ScriptedPhotoRepository::new()
                .with_page(1, vec![Resource::success(vec![photo(1), photo(2)])]),
        );
        let monitor = Arc::new(FakeNetworkMonitor::new(true));
        let vm = view_model(&repository, &monitor);

        wait_for_state(&vm, PhotoListState::Success(vec![photo(1), photo(2)])).await;

        assert_eq!(repository.calls(), vec![(1, 15)]);
        let cursor = vm.cursor();
        assert_eq!(cursor.current_page, 1);
        assert!(!cursor.is_loading_more);
    }

    #[tokio::test]
    async fn test_requests_while_loading_do_not_refetch() {
        let repository = Arc::new(
            ScriptedPhotoRepository::new().with_page(1, vec![Resource::success(vec![photo(1)])]),
        );
        repository.hold();
        let monitor = Arc::new(FakeNetworkMonitor::new(true));
        let vm = view_model(&repository, &monitor);

        vm.request_page(None);
        vm.request_page(Some(1));
        vm.load_next_page();
        repository.release();

        wait_for_state(&vm, PhotoListState::Success(vec![photo(1)])).await;
        assert_eq!(repository.calls(), vec![(1, 15)]);
    }

    #[tokio::test]
    async fn test_next_page_appends_and_empty_page_ends_paging() {
        let repository = Arc::new(
            ScriptedPhotoRepository::new()
                .with_page(1, vec![Resource::success(vec![photo(1)])])
                .with_page(2, vec![Resource::success(vec![photo(2)])])
                .with_page(3, vec![Resource::success(Vec::new())]),
        );
        let monitor = Arc::new(FakeNetworkMonitor::new(true));
        let vm = view_model(&repository, &monitor);
        wait_for_state(&vm, PhotoListState::Success(vec![photo(1)])).await;

        vm.load_next_page();
        wait_for_state(&vm, PhotoListState::Success(vec![photo(1), photo(2)])).await;

        vm.load_next_page();
        wait_for_cursor(&vm, |cursor| cursor.is_last_page).await;

        let cursor = vm.cursor();
        assert!(!cursor.is_loading_more);
        assert_eq!(cursor.current_page, 2);
        assert_eq!(vm.state(), PhotoListState::Success(vec![photo(1), photo(2)]));

        vm.load_next_page();
        wait_for_cursor(&vm, |cursor| !cursor.is_loading_more).await;
        assert_eq!(repository.calls(), vec![(1, 15), (2, 15), (3, 15)]);
    }

    #[tokio::test]
    async fn test_fallback_after_error_merges_without_duplicates() {
        let repository = Arc::new(
            ScriptedPhotoRepository::new()
                .with_page(1, vec![Resource::success(vec![photo(1)])])
                .with_page(
                    2,
                    vec![
                        Resource::error("HTTP Error: 500 Internal Server Error"),
                        Resource::success_with_message(
                            vec![photo(3), photo(1)],
                            "Loaded from cache due to HTTP error.",
                        ),
                    ],
                ),
        );
        let monitor = Arc::new(FakeNetworkMonitor::new(true));
        let vm = view_model(&repository, &monitor);
        wait_for_state(&vm, PhotoListState::Success(vec![photo(1)])).await;

        vm.load_next_page();
        wait_for_state(&vm, PhotoListState::Success(vec![photo(1), photo(3)])).await;

        assert_eq!(vm.cursor().current_page, 1);
        assert!(!vm.cursor().is_loading_more);
    }

    #[tokio::test]
    async fn test_offline_error_is_published() {
        let repository = Arc::new(ScriptedPhotoRepository::new().with_page(
            1,
            vec![Resource::error("Offline: No cached data available.")],
        ));
        let monitor = Arc::new(FakeNetworkMonitor::new(false));
        let vm = view_model(&repository, &monitor);

        wait_for_state(
            &vm,
            PhotoListState::Error("Offline: No cached data available.".to_string()),
        )
        .await;
        assert!(!vm.cursor().is_loading_more);
    }

    #[tokio::test]
    async fn test_connectivity_changes_are_mirrored_in_order() {
        let repository = Arc::new(ScriptedPhotoRepository::new());
        let monitor = Arc::new(FakeNetworkMonitor::new(true));
        let vm = view_model(&repository, &monitor);
        let mut online = vm.subscribe_online();
        assert!(vm.is_online());

        monitor.emit(false);
        timeout(WAIT, online.wait_for(|status| !*status))
            .await
            .unwrap()
            .unwrap();

        monitor.emit(true);
        timeout(WAIT, online.wait_for(|status| *status))
            .await
            .unwrap()
            .unwrap();

        assert!(vm.is_online());
        assert!(!online.has_changed().unwrap());
        assert_eq!(repository.calls(), vec![(1, 15)]);
    }

    #[tokio::test]
    async fn test_drop_cancels_worker() {
        let repository = Arc::new(ScriptedPhotoRepository::new());
        repository.hold();
        let monitor = Arc::new(FakeNetworkMonitor::new(true));
        let vm = view_model(&repository, &monitor);
        let mut state = vm.subscribe_state();

        drop(vm);

        let changed = timeout(WAIT, async {
            loop {
                if state.changed().await.is_err() {
                    break;
                }
            }
        })
        .await;
        assert!(changed.is_ok());
    }
}
