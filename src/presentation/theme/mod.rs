//! Light and dark palettes.

pub(crate) mod adapter;
mod service;

pub use service::Theme;
