//! Domain entity definitions.

mod photo;

pub use photo::{Photo, PhotoId};
