//! UI screens.

mod app;
mod gallery_screen;

pub use app::{App, ImagePipeline};
pub use gallery_screen::{GalleryScreen, GalleryScreenState};
