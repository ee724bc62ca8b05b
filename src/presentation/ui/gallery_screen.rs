//! Photo gallery screen.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
};

use crate::domain::entities::Photo;
use crate::presentation::theme::Theme;
use crate::presentation::view_models::{PaginationCursor, PhotoListState};
use crate::presentation::widgets::{
    CardImages, HeaderBar, HeaderBarStyle, PhotoGrid, PhotoGridState, StatusBar, StatusLevel,
    Toast,
};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const HINTS: &str = "t theme · r retry · q quit ";

/// Everything the gallery screen shows, derived from view model output.
pub struct GalleryScreenState {
    photos: Vec<Photo>,
    loading: bool,
    error: Option<String>,
    online: bool,
    cursor: PaginationCursor,
    toast: Option<Toast>,
    toast_duration: Duration,
    spinner_frame: usize,
    /// Grid selection and scroll.
    pub grid: PhotoGridState,
}

impl GalleryScreenState {
    /// Creates an empty, loading screen.
    #[must_use]
    pub fn new(columns: u16, toast_duration: Duration) -> Self {
        Self {
            photos: Vec::new(),
            loading: true,
            error: None,
            online: true,
            cursor: PaginationCursor::default(),
            toast: None,
            toast_duration,
            spinner_frame: 0,
            grid: PhotoGridState::new(columns),
        }
    }

    /// Photos currently shown.
    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Inline error label, present while the latest state is an error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Visible toast.
    #[must_use]
    pub const fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Photo under the selection.
    #[must_use]
    pub fn selected_photo(&self) -> Option<&Photo> {
        self.photos.get(self.grid.selected())
    }

    /// Applies a published list state. The last successful list survives errors.
    pub fn apply_state(&mut self, state: PhotoListState, now: Instant) {
        match state {
            PhotoListState::Loading => {
                self.loading = true;
                self.error = None;
            }
            PhotoListState::Success(photos) => {
                self.loading = false;
                self.error = None;
                self.photos = photos;
                self.grid.select(self.grid.selected(), self.photos.len());
            }
            PhotoListState::Error(message) => {
                self.loading = false;
                self.notify(message.clone(), StatusLevel::Error, now);
                self.error = Some(message);
            }
        }
    }

    /// Applies a connectivity change.
    pub fn set_online(&mut self, online: bool, now: Instant) {
        if self.online == online {
            return;
        }
        self.online = online;
        if online {
            self.notify("Back online", StatusLevel::Success, now);
        } else {
            self.notify("You are offline", StatusLevel::Warning, now);
        }
    }

    /// Mirrors the pagination cursor for the status line.
    pub const fn set_cursor(&mut self, cursor: PaginationCursor) {
        self.cursor = cursor;
    }

    /// Shows a toast for the configured duration.
    pub fn notify(&mut self, message: impl Into<String>, level: StatusLevel, now: Instant) {
        self.toast = Some(Toast::new(message, level, now, self.toast_duration));
    }

    /// Advances the spinner and drops an expired toast.
    pub fn tick(&mut self, now: Instant) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
            self.toast = None;
        }
    }

    fn hints(&self) -> String {
        let paging = if self.cursor.is_loading_more && !self.photos.is_empty() {
            format!("{} loading more · ", SPINNER_FRAMES[self.spinner_frame])
        } else if self.cursor.is_last_page {
            "end of feed · ".to_string()
        } else {
            String::new()
        };
        format!("{} photos · {paging}{HINTS}", self.photos.len())
    }
}

/// Gallery screen widget.
pub struct GalleryScreen<'a> {
    theme: &'a Theme,
    images: Option<&'a mut CardImages>,
}

impl<'a> GalleryScreen<'a> {
    /// Screen drawn with `theme`. Cards show swatches unless [`GalleryScreen::images`] is set.
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            images: None,
        }
    }

    /// Card images to draw.
    #[must_use]
    pub fn images(mut self, images: &'a mut CardImages) -> Self {
        self.images = Some(images);
        self
    }

    fn render_body(&mut self, area: Rect, buf: &mut Buffer, state: &mut GalleryScreenState) {
        if !state.photos.is_empty() {
            let mut grid = PhotoGrid::new(&state.photos, self.theme);
            if let Some(images) = self.images.as_deref_mut() {
                grid = grid.images(images);
            }
            grid.render(area, buf, &mut state.grid);
            return;
        }

        let message = if state.loading {
            Line::from(vec![
                Span::styled(
                    SPINNER_FRAMES[state.spinner_frame],
                    ratatui::style::Style::default().fg(self.theme.accent),
                ),
                Span::raw(" Loading photos…"),
            ])
        } else if state.error.is_some() {
            Line::styled("Nothing to show yet. Press r to retry.", self.theme.dimmed_style)
        } else {
            Line::styled("No photos.", self.theme.dimmed_style)
        };

        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        Paragraph::new(message).centered().render(center, buf);
    }
}

impl StatefulWidget for GalleryScreen<'_> {
    type State = GalleryScreenState;

    fn render(mut self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        Block::default().style(self.theme.base_style).render(area, buf);

        let error_height = u16::from(state.error.is_some());
        let [header_area, body_area, error_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(error_height),
            Constraint::Length(1),
        ])
        .areas(area);

        HeaderBar::new(crate::NAME, crate::VERSION)
            .online(state.online)
            .mode(self.theme.mode)
            .style(HeaderBarStyle::from_theme(self.theme))
            .render(header_area, buf);

        self.render_body(body_area, buf, state);

        if let Some(error) = &state.error {
            Paragraph::new(Line::styled(format!(" {error}"), self.theme.error_style))
                .render(error_area, buf);
        }

        let status = StatusBar::new()
            .toast(state.toast.as_ref())
            .right(state.hints())
            .hint_style(self.theme.dimmed_style.add_modifier(Modifier::ITALIC));
        (&status).render(status_area, buf);
    }
}
