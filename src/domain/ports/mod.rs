//! Traits the infrastructure layer implements.

mod image_loader_port;
mod network_monitor_port;
mod photo_repository;

pub use image_loader_port::{ImageLoadedEvent, ImageLoaderPort};
pub use network_monitor_port::NetworkMonitor;
pub use photo_repository::{PhotoRepository, PhotoStream};

#[cfg(test)]
pub use image_loader_port::MockImageLoaderPort;
#[cfg(test)]
pub use photo_repository::MockPhotoRepository;

/// Hand-written test doubles.
#[cfg(test)]
pub mod mocks {
    pub use super::network_monitor_port::mock::FakeNetworkMonitor;
    pub use super::photo_repository::mock::ScriptedPhotoRepository;
}
