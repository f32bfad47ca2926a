//! Margin measurement
//!
//! Margins are either read from the glyph (outline extremes against the
//! advance width) or measured with a beam: a horizontal probe line at a
//! given height, giving the visual margin at that height.

use crate::font_source::{Margins, SpacingFont};
use crate::geometry::horizontal_line;

/// How far the beam extends past the origin and the advance width
pub const BEAM_OVERSHOOT: f64 = 1000.0;

/// Measure the margins of `glyph` in `layer`.
///
/// Without a beam the stored margins are returned. With a beam, the probe
/// line crossings plus the two sidebearing positions (0 and the advance
/// width) are sorted; the left margin is the distance from the first to
/// the second, the right margin from the second-to-last to the last.
/// Returns `None` when the glyph is missing or empty, or when fewer than
/// three crossings exist (the beam misses the outline).
pub fn margins<F: SpacingFont + ?Sized>(
    font: &F,
    layer: &str,
    glyph: &str,
    beam: Option<f64>,
) -> Option<Margins> {
    let Some(y) = beam else {
        return font.stored_margins(layer, glyph);
    };

    let width = font.width(layer, glyph)?;
    let line = horizontal_line(y, -BEAM_OVERSHOOT, width + BEAM_OVERSHOOT);

    let mut crossings = font.intersect(layer, glyph, line);
    crossings.push(0.0);
    crossings.push(width);
    crossings.sort_by(f64::total_cmp);

    if crossings.len() < 3 {
        return None;
    }
    let n = crossings.len();
    Some(Margins::new(
        crossings[1] - crossings[0],
        crossings[n - 1] - crossings[n - 2],
    ))
}
