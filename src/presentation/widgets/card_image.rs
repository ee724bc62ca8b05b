//! Per-card image state and the terminal graphics picker.

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;

use image::DynamicImage;
use ratatui_image::picker::{Capability, Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;
use tracing::debug;

use crate::domain::entities::{Photo, PhotoId};
use crate::domain::ports::ImageLoadedEvent;

/// Cards on either side of the viewport whose images are requested ahead of time.
pub const LOAD_BUFFER: usize = 4;

/// Cards on either side of the viewport whose decoded images stay in this state.
const KEEP_BUFFER: usize = LOAD_BUFFER * 3;

/// Where a card's image stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    /// Requested from the loader, no answer yet.
    Loading,
    /// Decoded and ready to draw.
    Ready,
    /// The loader gave up; carries its message.
    Failed(String),
}

struct CardImage {
    status: ImageStatus,
    image: Option<Arc<DynamicImage>>,
    protocol: Option<StatefulProtocol>,
}

impl CardImage {
    const fn loading() -> Self {
        Self {
            status: ImageStatus::Loading,
            image: None,
            protocol: None,
        }
    }
}

/// Images of the cards around the viewport, plus the picker that turns them into terminal
/// graphics (kitty, sixel, iTerm2 or half blocks).
pub struct CardImages {
    picker: Picker,
    cards: HashMap<PhotoId, CardImage>,
}

impl CardImages {
    /// Queries the terminal for its graphics protocol and font size, falling back to half
    /// blocks. Call after the terminal is in raw mode and before reading events.
    #[must_use]
    pub fn new() -> Self {
        let mut picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());

        let caps = picker.capabilities();
        let has_sixel = caps.iter().any(|c| matches!(c, Capability::Sixel));
        let has_kitty = caps.iter().any(|c| matches!(c, Capability::Kitty));
        if has_sixel && !has_kitty && picker.protocol_type() == ProtocolType::Halfblocks {
            picker.set_protocol_type(ProtocolType::Sixel);
        }

        debug!(protocol = ?picker.protocol_type(), "Image protocol selected");
        Self::with_picker(picker)
    }

    /// Uses half blocks without touching the terminal.
    #[must_use]
    pub fn halfblocks() -> Self {
        Self::with_picker(Picker::halfblocks())
    }

    fn with_picker(picker: Picker) -> Self {
        Self {
            picker,
            cards: HashMap::new(),
        }
    }

    /// Status of the image for `id`, `None` if it was never requested or has been released.
    #[must_use]
    pub fn status(&self, id: PhotoId) -> Option<&ImageStatus> {
        self.cards.get(&id).map(|card| &card.status)
    }

    /// Returns `(id, url)` for every photo in `visible` (widened by [`LOAD_BUFFER`]) that has no
    /// image state yet, and marks them as loading.
    pub fn collect_needed_loads(
        &mut self,
        photos: &[Photo],
        visible: Range<usize>,
    ) -> Vec<(PhotoId, String)> {
        let window = widen(&visible, LOAD_BUFFER, photos.len());
        let mut needed = Vec::new();
        for photo in &photos[window] {
            if !self.cards.contains_key(&photo.id()) {
                self.cards.insert(photo.id(), CardImage::loading());
                needed.push((photo.id(), photo.image_url().to_string()));
            }
        }
        needed
    }

    /// Records a loader outcome.
    pub fn apply(&mut self, event: ImageLoadedEvent) {
        let card = self.cards.entry(event.id).or_insert_with(CardImage::loading);
        match event.result {
            Ok(image) => {
                card.image = Some(image);
                card.protocol = None;
                card.status = ImageStatus::Ready;
            }
            Err(message) => {
                card.image = None;
                card.protocol = None;
                card.status = ImageStatus::Failed(message);
            }
        }
    }

    /// Drawable protocol for a ready image, created on first use.
    pub fn protocol_mut(&mut self, id: PhotoId) -> Option<&mut StatefulProtocol> {
        let card = self.cards.get_mut(&id)?;
        if card.protocol.is_none() {
            let image = card.image.as_ref()?;
            card.protocol = Some(self.picker.new_resize_protocol((**image).clone()));
        }
        card.protocol.as_mut()
    }

    /// Forgets settled images far from `visible`. They are requested again, and served from the
    /// loader's caches, when scrolled back into view. Pending requests are kept.
    pub fn release_distant(&mut self, photos: &[Photo], visible: Range<usize>) {
        let window = widen(&visible, KEEP_BUFFER, photos.len());
        let keep: HashSet<PhotoId> = photos[window].iter().map(Photo::id).collect();
        let before = self.cards.len();
        self.cards
            .retain(|id, card| keep.contains(id) || card.status == ImageStatus::Loading);
        if self.cards.len() < before {
            debug!(released = before - self.cards.len(), "Released distant card images");
        }
    }
}

impl Default for CardImages {
    fn default() -> Self {
        Self::new()
    }
}

fn widen(range: &Range<usize>, by: usize, len: usize) -> Range<usize> {
    let end = range.end.saturating_add(by).min(len);
    let start = range.start.saturating_sub(by).min(end);
    start..end
}
