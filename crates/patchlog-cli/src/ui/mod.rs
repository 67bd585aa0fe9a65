//! Terminal output.

pub mod render;
pub mod theme;

pub use theme::Theme;
