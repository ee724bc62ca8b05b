//! Curated photo entity.

use serde::{Deserialize, Serialize};

/// Unique identifier for a photo, stable across the wire, domain and cache shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhotoId(pub u64);

impl PhotoId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PhotoId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A photo as the gallery displays it.
///
/// Equality is structural over every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Photo {
    id: PhotoId,
    image_url: String,
    photographer: String,
    photographer_url: String,
    avg_color: String,
}

impl Photo {
    /// Creates a new photo.
    #[must_use]
    pub fn new(
        id: impl Into<PhotoId>,
        image_url: impl Into<String>,
        photographer: impl Into<String>,
        photographer_url: impl Into<String>,
        avg_color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            image_url: image_url.into(),
            photographer: photographer.into(),
            photographer_url: photographer_url.into(),
            avg_color: avg_color.into(),
        }
    }

    /// Returns the photo ID.
    #[must_use]
    pub const fn id(&self) -> PhotoId {
        self.id
    }

    /// Returns the URL of the displayed size variant.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Returns the photographer name.
    #[must_use]
    pub fn photographer(&self) -> &str {
        &self.photographer
    }

    /// Returns the photographer profile URL.
    #[must_use]
    pub fn photographer_url(&self) -> &str {
        &self.photographer_url
    }

    /// Returns the average colour as a hex string (e.g. `#7E6A5B`).
    #[must_use]
    pub fn avg_color(&self) -> &str {
        &self.avg_color
    }
}
