//! Local photo cache.

mod entity;
mod json_store;
mod memory_store;
mod store;

pub use entity::PhotoEntity;
pub use json_store::JsonPhotoStore;
pub use memory_store::MemoryPhotoStore;
pub use store::PhotoStore;
