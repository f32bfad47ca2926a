//! UFO data loading and conversion

pub mod conversions;
pub mod ufo;

pub use conversions::{contour_to_bezpath, glyph_outline, translate_glyph};
pub use ufo::{load_ufo_from_path, save_ufo_to_path};
