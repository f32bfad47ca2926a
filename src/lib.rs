//! bezy-spacing
pub mod core;
pub mod data;
pub mod font_source;
pub mod geometry;
pub mod logging;
pub mod spacing;
