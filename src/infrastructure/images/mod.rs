//! Card image pipeline: an LRU of decoded images, a size-capped disk cache of downloads, and the
//! loader that drives them.

pub mod disk_cache;
pub mod loader;
pub mod memory_cache;

pub use disk_cache::DiskImageCache;
pub use loader::ImageLoader;
pub use memory_cache::MemoryImageCache;
