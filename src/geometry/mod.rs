//! Geometric Primitives and Operations

pub mod bounds;
pub mod intersect;

// Re-export commonly used items
pub use bounds::{outline_bounds, translate_outline};
pub use intersect::{horizontal_line, path_line_crossings, x_crossings};
