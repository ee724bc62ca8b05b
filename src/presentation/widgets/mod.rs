//! Gallery widgets.

mod card_image;
mod header_bar;
mod photo_grid;
mod status_bar;

pub use card_image::{CardImages, ImageStatus};
pub use header_bar::{HeaderBar, HeaderBarStyle};
pub use photo_grid::{CARD_HEIGHT, PhotoGrid, PhotoGridState};
pub use status_bar::{StatusBar, StatusLevel, Toast};
