//! Font source access for the spacing core
//!
//! The spacing operations never touch a concrete font type. They go
//! through [`SpacingFont`], a narrow capability interface over groups,
//! layers, glyph metrics, outline intersection and the host's undo hooks.
//! Two implementations ship with the crate: [`UfoFont`] over a norad UFO
//! and [`MemoryFont`], an in-memory font for tests and file-less hosts.

pub mod memory;
pub mod metrics;
pub mod ufo;

use crate::core::errors::SpacingResult;
use kurbo::{Line, Rect};
use std::collections::BTreeMap;

// Explicit re-exports for public API
pub use memory::{MemoryFont, MemoryGlyph, UndoEvent};
pub use metrics::FontMetrics;
pub use ufo::UfoFont;

/// A glyph's left and right margins (sidebearings)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    pub fn get(&self, side: crate::spacing::Side) -> f64 {
        match side {
            crate::spacing::Side::Left => self.left,
            crate::spacing::Side::Right => self.right,
        }
    }
}

/// Everything the spacing core needs from a font.
///
/// Glyphs are addressed by `(layer, glyph)` names. Read accessors return
/// `None` for missing layers or glyphs; mutators return an error.
pub trait SpacingFont {
    /// Group names in this font's iteration order
    fn group_names(&self) -> Vec<String>;

    /// Members of a group, in stored order
    fn group(&self, name: &str) -> Option<Vec<String>>;

    /// Create or replace groups. Either every group is written or none is.
    fn set_groups(&mut self, groups: BTreeMap<String, Vec<String>>) -> SpacingResult<()>;

    /// Layer names in font-declared order
    fn layer_names(&self) -> Vec<String>;

    /// The layer edits target unless all layers are requested
    fn current_layer(&self) -> String;

    fn has_glyph(&self, layer: &str, glyph: &str) -> bool;

    /// Advance width
    fn width(&self, layer: &str, glyph: &str) -> Option<f64>;

    /// Bounding box of the outline including components, `None` if empty
    fn bounds(&self, layer: &str, glyph: &str) -> Option<Rect>;

    /// X coordinates where `line` crosses the outline (component contours
    /// included, sidebearings not included), sorted ascending
    fn intersect(&self, layer: &str, glyph: &str, line: Line) -> Vec<f64>;

    /// Shift the outline so the left margin equals `value`; the right
    /// margin is kept
    fn set_left_margin(&mut self, layer: &str, glyph: &str, value: f64) -> SpacingResult<()>;

    /// Change the advance width so the right margin equals `value`
    fn set_right_margin(&mut self, layer: &str, glyph: &str, value: f64) -> SpacingResult<()>;

    /// Open an undo transaction for one glyph
    fn begin_undo(&mut self, layer: &str, glyph: &str, label: &str);

    /// Close the transaction opened by `begin_undo`
    fn commit_undo(&mut self, layer: &str, glyph: &str);

    /// Roll the glyph back to its state at `begin_undo`
    fn abort_undo(&mut self, layer: &str, glyph: &str);

    /// Notify the host that a glyph changed
    fn changed(&mut self, layer: &str, glyph: &str);

    fn vertical_metrics(&self) -> FontMetrics;

    /// Margins stored in the glyph: distance from the outline extremes to
    /// the origin and to the advance width
    fn stored_margins(&self, layer: &str, glyph: &str) -> Option<Margins> {
        let width = self.width(layer, glyph)?;
        let bounds = self.bounds(layer, glyph)?;
        Some(Margins::new(bounds.x0, width - bounds.x1))
    }

    fn set_margin(
        &mut self,
        layer: &str,
        glyph: &str,
        side: crate::spacing::Side,
        value: f64,
    ) -> SpacingResult<()> {
        match side {
            crate::spacing::Side::Left => self.set_left_margin(layer, glyph, value),
            crate::spacing::Side::Right => self.set_right_margin(layer, glyph, value),
        }
    }
}
