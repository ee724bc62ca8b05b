//! Pexels wire types.

use serde::Deserialize;

/// Pexels curated feed response page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageEnvelope {
    /// Page number this response covers.
    pub page: u32,
    /// Page size the server applied.
    pub per_page: u32,
    /// Photos on this page.
    #[serde(default)]
    pub photos: Vec<PhotoDto>,
    /// Total number of curated photos.
    #[serde(default)]
    pub total_results: u64,
    /// URL of the next page, absent on the last page.
    #[serde(default)]
    pub next_page: Option<String>,
}

/// Pexels photo resource.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoDto {
    /// Pexels photo ID.
    pub id: u64,
    /// Original width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Original height in pixels.
    #[serde(default)]
    pub height: u32,
    /// Pexels page of the photo.
    #[serde(default)]
    pub url: String,
    /// Photographer name.
    #[serde(default)]
    pub photographer: String,
    /// Photographer profile URL.
    #[serde(default)]
    pub photographer_url: String,
    /// Photographer ID.
    #[serde(default)]
    pub photographer_id: u64,
    /// Average colour as hex.
    #[serde(default)]
    pub avg_color: String,
    /// Size variant URLs.
    #[serde(default)]
    pub src: PhotoSrcDto,
    /// Whether the API key owner liked the photo.
    #[serde(default)]
    pub liked: bool,
    /// Alt text.
    #[serde(default)]
    pub alt: String,
}

/// Size variant URLs of a Pexels photo.
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct PhotoSrcDto {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub large2x: String,
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub portrait: String,
    #[serde(default)]
    pub landscape: String,
    #[serde(default)]
    pub tiny: String,
}

/// Pexels API error body.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message from Pexels.
    pub error: String,
}
