//! Presentation layer with UI components and event handling.

/// Keyboard input mapping.
pub mod events;
/// Light and dark palettes.
pub mod theme;
/// UI screens.
pub mod ui;
/// View models.
pub mod view_models;
/// Reusable widgets.
pub mod widgets;

pub use ui::{App, ImagePipeline};
pub use view_models::PhotoListViewModel;
pub use widgets::CardImages;
