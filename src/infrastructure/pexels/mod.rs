//! Pexels curated photo API.

mod api;
mod client;
mod dto;

#[cfg(test)]
pub use api::MockCuratedPhotoApi;
pub use api::CuratedPhotoApi;
pub use client::{PEXELS_API_BASE, PexelsClient};
pub(crate) use client::USER_AGENT;
pub use dto::{PageEnvelope, PhotoDto, PhotoSrcDto};
