//! Theme resolution and application.

mod theme_manager;
mod theme_model;

pub use theme_manager::{PresentationLayer, StylesheetSlot, ThemeManager};
pub use theme_model::{Stylesheet, Theme};
