//! Persisted photo row.

use serde::{Deserialize, Serialize};

/// Cached photo row. `id` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntity {
    /// Photo ID.
    pub id: u64,
    /// URL of the displayed size variant.
    pub image_url: String,
    /// Photographer name.
    pub photographer: String,
    /// Photographer profile URL.
    pub photographer_url: String,
    /// Average colour as hex.
    pub avg_color: String,
}
