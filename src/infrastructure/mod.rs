//! Infrastructure layer with external service adapters.

/// Atomic file replacement.
pub mod atomic_file;
/// Application configuration.
pub mod config;
/// TCP reachability probe.
pub mod connectivity;
/// Card image loading and caching.
pub mod images;
/// Local photo cache.
pub mod local;
/// Conversions between photo shapes.
pub mod mappers;
/// Pexels API client.
pub mod pexels;
/// Photo repository.
pub mod repository;
/// Theme preference persistence.
pub mod theme_preference;

pub use config::{AppConfig, CliArgs, ImagesConfig, LogLevel, StorageManager, ThemeMode};
pub use connectivity::TcpNetworkMonitor;
pub use images::{DiskImageCache, ImageLoader};
pub use local::{JsonPhotoStore, MemoryPhotoStore, PhotoEntity, PhotoStore};
pub use pexels::{CuratedPhotoApi, PexelsClient};
pub use repository::PhotoRepositoryImpl;
pub use theme_preference::ThemePreferenceStore;
