//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Request progress envelope.
pub mod resource;

pub use entities::{Photo, PhotoId};
pub use errors::{FetchError, ImageError, StoreError};
pub use ports::{ImageLoadedEvent, ImageLoaderPort, NetworkMonitor, PhotoRepository, PhotoStream};
pub use resource::Resource;
