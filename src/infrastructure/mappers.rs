//! Conversions between the wire, domain and cache shapes of a photo.

use super::local::PhotoEntity;
use super::pexels::PhotoDto;
use crate::domain::entities::{Photo, PhotoId};

/// Maps an API photo to the domain, keeping the `large` size variant.
#[must_use]
pub fn dto_to_domain(dto: &PhotoDto) -> Photo {
    Photo::new(
        dto.id,
        dto.src.large.clone(),
        dto.photographer.clone(),
        dto.photographer_url.clone(),
        dto.avg_color.clone(),
    )
}

/// Maps a cached row to the domain.
#[must_use]
pub fn entity_to_domain(entity: &PhotoEntity) -> Photo {
    Photo::new(
        PhotoId(entity.id),
        entity.image_url.clone(),
        entity.photographer.clone(),
        entity.photographer_url.clone(),
        entity.avg_color.clone(),
    )
}

/// Maps a domain photo to a cache row.
#[must_use]
pub fn domain_to_entity(photo: &Photo) -> PhotoEntity {
    PhotoEntity {
        id: photo.id().as_u64(),
        image_url: photo.image_url().to_string(),
        photographer: photo.photographer().to_string(),
        photographer_url: photo.photographer_url().to_string(),
        avg_color: photo.avg_color().to_string(),
    }
}
