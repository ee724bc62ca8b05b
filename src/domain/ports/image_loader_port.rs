//! Card image loading port definition.

use std::sync::Arc;

use image::DynamicImage;

use crate::domain::entities::PhotoId;

/// Sent when an image request finishes, successfully or not.
#[derive(Debug, Clone)]
pub struct ImageLoadedEvent {
    /// Photo the image belongs to.
    pub id: PhotoId,
    /// Decoded image, or a short failure description.
    pub result: Result<Arc<DynamicImage>, String>,
}

/// Port for loading card images in the background.
#[cfg_attr(test, mockall::automock)]
pub trait ImageLoaderPort: Send + Sync {
    /// Queues `url` for photo `id`. The outcome arrives later as an [`ImageLoadedEvent`].
    fn load_async(&self, id: PhotoId, url: String);
}
