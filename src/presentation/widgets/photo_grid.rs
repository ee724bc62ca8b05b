//! Multi-column grid of photo cards.

use std::iter::repeat_n;
use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
};
use ratatui_image::StatefulImage;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::card_image::{CardImages, ImageStatus};
use crate::domain::entities::Photo;
use crate::presentation::theme::Theme;

/// Rows taken by one card, borders included.
pub const CARD_HEIGHT: u16 = 10;

/// Text rows under the image: image URL and photographer link.
const CAPTION_ROWS: u16 = 2;

const IMAGE_FAILED: &str = "✕ image unavailable";

/// Selection and scroll position of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoGridState {
    selected: usize,
    offset_row: usize,
    columns: usize,
    visible_rows: usize,
}

impl PhotoGridState {
    /// Creates a state for a grid of `columns` cards per row.
    #[must_use]
    pub fn new(columns: u16) -> Self {
        Self {
            selected: 0,
            offset_row: 0,
            columns: usize::from(columns.max(1)),
            visible_rows: 1,
        }
    }

    /// Index of the selected photo.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// First visible row.
    #[must_use]
    pub const fn offset_row(&self) -> usize {
        self.offset_row
    }

    /// Number of photos after the selected one.
    #[must_use]
    pub const fn remaining(&self, len: usize) -> usize {
        len.saturating_sub(self.selected + 1)
    }

    /// True when the selection sits within `threshold` photos of the end of a non-empty list.
    #[must_use]
    pub fn is_near_end(&self, len: usize, threshold: usize) -> bool {
        len > 0 && self.remaining(len) < threshold.max(1)
    }

    /// Indices of the photos on screen after the last render.
    #[must_use]
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = (self.offset_row * self.columns).min(len);
        let end = ((self.offset_row + self.visible_rows) * self.columns).min(len);
        start..end
    }

    /// One row up.
    pub fn move_up(&mut self, len: usize) {
        self.select(self.selected.saturating_sub(self.columns), len);
    }

    /// One row down, stopping at the last photo.
    pub fn move_down(&mut self, len: usize) {
        self.select(self.selected + self.columns, len);
    }

    /// Previous photo.
    pub fn move_left(&mut self, len: usize) {
        self.select(self.selected.saturating_sub(1), len);
    }

    /// Next photo.
    pub fn move_right(&mut self, len: usize) {
        self.select(self.selected + 1, len);
    }

    /// One screen of rows up.
    pub fn page_up(&mut self, len: usize) {
        let step = self.columns * self.visible_rows;
        self.select(self.selected.saturating_sub(step), len);
    }

    /// One screen of rows down.
    pub fn page_down(&mut self, len: usize) {
        let step = self.columns * self.visible_rows;
        self.select(self.selected + step, len);
    }

    /// First photo.
    pub fn first(&mut self, len: usize) {
        self.select(0, len);
    }

    /// Last photo.
    pub fn last(&mut self, len: usize) {
        self.select(len.saturating_sub(1), len);
    }

    /// Selects `index`, clamped to the list.
    pub fn select(&mut self, index: usize, len: usize) {
        self.selected = index.min(len.saturating_sub(1));
        self.scroll_into_view();
    }

    fn scroll_into_view(&mut self) {
        let row = self.selected / self.columns;
        if row < self.offset_row {
            self.offset_row = row;
        } else if row >= self.offset_row + self.visible_rows {
            self.offset_row = row + 1 - self.visible_rows;
        }
    }
}

/// Grid of photo cards: the photo (average colour swatch until it arrives), image URL and
/// photographer link.
pub struct PhotoGrid<'a> {
    photos: &'a [Photo],
    theme: &'a Theme,
    images: Option<&'a mut CardImages>,
}

impl<'a> PhotoGrid<'a> {
    /// Grid over `photos`. Without [`PhotoGrid::images`] every card shows its swatch.
    #[must_use]
    pub const fn new(photos: &'a [Photo], theme: &'a Theme) -> Self {
        Self {
            photos,
            theme,
            images: None,
        }
    }

    /// Draws loaded images from `images`.
    #[must_use]
    pub fn images(mut self, images: &'a mut CardImages) -> Self {
        self.images = Some(images);
        self
    }

    fn render_card(&mut self, photo: &Photo, selected: bool, area: Rect, buf: &mut Buffer) {
        let border_style = if selected {
            self.theme.selection_style
        } else {
            self.theme.card_style
        };
        let title = truncate(photo.photographer(), usize::from(area.width.saturating_sub(4)));
        let block = Block::bordered()
            .border_style(border_style)
            .title(Span::styled(format!(" {title} "), border_style.add_modifier(Modifier::BOLD)));

        let inner = block.inner(area);
        block.render(area, buf);

        let caption_rows = CAPTION_ROWS.min(inner.height);
        let [image_area, caption_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(caption_rows),
        ])
        .areas(inner);

        self.render_image(photo, image_area, buf);

        let width = usize::from(inner.width);
        let caption = vec![
            Line::styled(truncate(photo.image_url(), width), self.theme.base_style),
            Line::styled(
                truncate(photo.photographer_url(), width),
                self.theme.dimmed_style,
            ),
        ];
        Paragraph::new(caption).render(caption_area, buf);
    }

    fn render_image(&mut self, photo: &Photo, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        if let Some(protocol) = self
            .images
            .as_deref_mut()
            .and_then(|images| images.protocol_mut(photo.id()))
        {
            StatefulWidget::render(StatefulImage::default(), area, buf, protocol);
            return;
        }

        let failed = self
            .images
            .as_deref()
            .and_then(|images| images.status(photo.id()))
            .is_some_and(|status| matches!(status, ImageStatus::Failed(_)));

        let swatch_style = Theme::swatch_style(photo.avg_color());
        Block::default().style(swatch_style).render(area, buf);

        let width = usize::from(area.width);
        let mut lines = vec![Line::from(truncate(&format!(" {}", photo.avg_color()), width))];
        if failed {
            lines.push(Line::styled(
                truncate(&format!(" {IMAGE_FAILED}"), width),
                swatch_style.patch(self.theme.error_style),
            ));
        }
        Paragraph::new(lines).style(swatch_style).render(area, buf);
    }
}

impl StatefulWidget for PhotoGrid<'_> {
    type State = PhotoGridState;

    #[allow(clippy::cast_possible_truncation)]
    fn render(mut self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let photos = self.photos;
        if area.height == 0 || area.width == 0 || photos.is_empty() {
            return;
        }

        state.visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        state.select(state.selected, photos.len());

        let rows = Layout::vertical(repeat_n(
            Constraint::Length(CARD_HEIGHT),
            state.visible_rows,
        ))
        .split(area);
        let column_constraints =
            repeat_n(Constraint::Ratio(1, state.columns as u32), state.columns);
        let columns = Layout::horizontal(column_constraints);

        for (row_index, row_area) in rows.iter().enumerate() {
            let row = state.offset_row + row_index;
            for (column, cell) in columns.split(*row_area).iter().enumerate() {
                let index = row * state.columns + column;
                let Some(photo) = photos.get(index) else {
                    return;
                };
                self.render_card(photo, index == state.selected, *cell, buf);
            }
        }
    }
}

/// Cuts `text` to `max` display columns, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
