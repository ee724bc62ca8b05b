//! Main application orchestrator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, trace, warn};

use crate::domain::ports::{ImageLoadedEvent, ImageLoaderPort};
use crate::infrastructure::{AppConfig, ThemePreferenceStore};
use crate::presentation::events::{EventHandler, GalleryAction};
use crate::presentation::theme::Theme;
use crate::presentation::ui::{GalleryScreen, GalleryScreenState};
use crate::presentation::view_models::PhotoListViewModel;
use crate::presentation::widgets::{CardImages, StatusLevel};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Card image plumbing handed to [`App`].
pub struct ImagePipeline {
    /// Fetches images in the background.
    pub loader: Arc<dyn ImageLoaderPort>,
    /// Outcomes reported by `loader`.
    pub events: mpsc::UnboundedReceiver<ImageLoadedEvent>,
    /// Per-card image state and the graphics picker.
    pub cards: CardImages,
}

/// The terminal gallery: owns the screen state and drives it from the view model, the card
/// image loader and keyboard input.
pub struct App {
    view_model: PhotoListViewModel,
    theme_store: ThemePreferenceStore,
    images: ImagePipeline,
    theme: Theme,
    screen: GalleryScreenState,
    prefetch_threshold: usize,
    running: bool,
}

impl App {
    /// Creates the app with the theme preference read once from `theme_store`.
    #[must_use]
    pub fn new(
        view_model: PhotoListViewModel,
        theme_store: ThemePreferenceStore,
        images: ImagePipeline,
        config: &AppConfig,
    ) -> Self {
        let mode = theme_store.load();
        info!(%mode, "Theme preference loaded");

        Self {
            view_model,
            theme_store,
            images,
            theme: Theme::new(&config.theme.accent_color, mode),
            screen: GalleryScreenState::new(
                config.gallery.columns,
                Duration::from_secs(config.ui.notification_duration),
            ),
            prefetch_threshold: config.gallery.prefetch_threshold,
            running: true,
        }
    }

    /// Runs until the user quits.
    ///
    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut state_rx = self.view_model.subscribe_state();
        let mut online_rx = self.view_model.subscribe_online();
        let mut cursor_rx = self.view_model.subscribe_cursor();
        let mut tick = interval(TICK_RATE);

        let initial = state_rx.borrow_and_update().clone();
        self.screen.apply_state(initial, Instant::now());
        terminal.draw(|frame| self.render(frame))?;
        self.request_images();

        while self.running {
            tokio::select! {
                Ok(()) = state_rx.changed() => {
                    let state = state_rx.borrow_and_update().clone();
                    self.screen.apply_state(state, Instant::now());
                }

                Ok(()) = online_rx.changed() => {
                    let online = *online_rx.borrow_and_update();
                    debug!(online, "Connectivity changed");
                    self.screen.set_online(online, Instant::now());
                }

                Ok(()) = cursor_rx.changed() => {
                    let cursor = *cursor_rx.borrow_and_update();
                    self.screen.set_cursor(cursor);
                }

                Some(event) = self.images.events.recv() => {
                    self.on_image_loaded(event);
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if let Event::Key(key) = event {
                        self.handle_key(&key);
                    }
                }

                _ = tick.tick() => {
                    self.screen.tick(Instant::now());
                }
            }

            terminal.draw(|frame| self.render(frame))?;
            self.request_images();
        }

        info!("Application exiting normally");
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let screen = GalleryScreen::new(&self.theme).images(&mut self.images.cards);
        frame.render_stateful_widget(screen, frame.area(), &mut self.screen);
    }

    /// Asks the loader for images of cards on or near the screen and lets go of distant ones.
    fn request_images(&mut self) {
        let photos = self.screen.photos();
        let visible = self.screen.grid.visible_range(photos.len());

        for (id, url) in self.images.cards.collect_needed_loads(photos, visible.clone()) {
            self.images.loader.load_async(id, url);
        }
        self.images.cards.release_distant(photos, visible);
    }

    fn on_image_loaded(&mut self, event: ImageLoadedEvent) {
        trace!(id = %event.id, ok = event.result.is_ok(), "Card image settled");
        self.images.cards.apply(event);
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let Some(action) = EventHandler::action_for(key) else {
            return;
        };

        let len = self.screen.photos().len();
        match action {
            GalleryAction::Quit => self.running = false,
            GalleryAction::ToggleTheme => self.toggle_theme(),
            GalleryAction::Select => self.show_selected(),
            GalleryAction::Retry => self.retry(),
            GalleryAction::Up => self.screen.grid.move_up(len),
            GalleryAction::Down => self.screen.grid.move_down(len),
            GalleryAction::Left => self.screen.grid.move_left(len),
            GalleryAction::Right => self.screen.grid.move_right(len),
            GalleryAction::PageUp => self.screen.grid.page_up(len),
            GalleryAction::PageDown => self.screen.grid.page_down(len),
            GalleryAction::First => self.screen.grid.first(len),
            GalleryAction::Last => self.screen.grid.last(len),
        }

        if matches!(
            action,
            GalleryAction::Down | GalleryAction::Right | GalleryAction::PageDown | GalleryAction::Last
        ) {
            self.prefetch_if_near_end();
        }
    }

    fn prefetch_if_near_end(&self) {
        let cursor = self.view_model.cursor();
        if cursor.is_loading_more || cursor.is_last_page {
            return;
        }

        let len = self.screen.photos().len();
        if self.screen.grid.is_near_end(len, self.prefetch_threshold) {
            debug!(len, selected = self.screen.grid.selected(), "Near end of list, loading next page");
            self.view_model.load_next_page();
        }
    }

    fn retry(&self) {
        if self.screen.photos().is_empty() {
            self.view_model.request_page(None);
        } else {
            self.view_model.load_next_page();
        }
    }

    fn show_selected(&mut self) {
        let Some(photographer) = self
            .screen
            .selected_photo()
            .map(|photo| photo.photographer().to_string())
        else {
            return;
        };
        self.screen.notify(
            format!("Selected {photographer}'s photo"),
            StatusLevel::Info,
            Instant::now(),
        );
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        let mode = self.theme.mode;
        info!(%mode, "Theme toggled");

        if let Err(e) = self.theme_store.save(mode) {
            warn!(error = %e, "Failed to persist theme preference");
            self.screen.notify(
                format!("Could not save theme: {e}"),
                StatusLevel::Error,
                Instant::now(),
            );
        }
    }
}
