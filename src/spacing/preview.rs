//! Group preview
//!
//! Builds the draw commands a host needs to show a glyph with all its
//! siblings overlaid, aligned on the spaced side. Nothing is drawn here;
//! the host renders the commands on its own canvas.

use super::side::Side;
use crate::font_source::SpacingFont;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Stroke width of the side indicator, in font units
pub const SIDE_INDICATOR_WIDTH: f64 = 10.0;
/// Fill alpha of the glyph being spaced
const SOURCE_ALPHA: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Preview appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewStyle {
    /// Sibling fill opacity, 0.0 to 0.9
    pub opacity: f64,
    pub glyph_color: Rgba,
    pub background_color: Rgba,
    /// Host shows light glyphs on a dark background
    pub inverse: bool,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            opacity: 0.4,
            glyph_color: Rgba::BLACK,
            background_color: Rgba::WHITE,
            inverse: false,
        }
    }
}

impl PreviewStyle {
    pub const MAX_OPACITY: f64 = 0.9;

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, Self::MAX_OPACITY);
        self
    }

    fn ink(&self) -> Rgba {
        if self.inverse {
            self.background_color
        } else {
            self.glyph_color
        }
    }

    fn paper(&self) -> Rgba {
        if self.inverse {
            self.glyph_color
        } else {
            self.background_color
        }
    }
}

/// A single drawing instruction, in glyph coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill a glyph's outline, shifted horizontally by `dx`
    Glyph {
        layer: String,
        glyph: String,
        dx: f64,
        fill: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Rgba,
        width: f64,
    },
}

/// Draw commands for `glyph` and its `siblings` on `side`, in the current
/// layer. Siblings are right-aligned on the advance width for the right
/// side and share the origin for the left side. An empty sibling list or a
/// missing glyph gives no commands.
pub fn render_preview<F: SpacingFont + ?Sized>(
    font: &F,
    glyph: &str,
    siblings: &[String],
    side: Side,
    style: &PreviewStyle,
) -> Vec<DrawCommand> {
    let layer = font.current_layer();
    let Some(width) = font.width(&layer, glyph) else {
        return Vec::new();
    };
    if siblings.is_empty() {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(siblings.len() + 2);

    // Hide the solid glyph
    if font.bounds(&layer, glyph).is_some() {
        commands.push(DrawCommand::Glyph {
            layer: layer.clone(),
            glyph: glyph.to_string(),
            dx: 0.0,
            fill: style.paper(),
        });
    }

    let metrics = font.vertical_metrics();
    let x = match side {
        Side::Left => 0.0,
        Side::Right => width,
    };
    commands.push(DrawCommand::Line {
        from: Point::new(x, metrics.descender),
        to: Point::new(x, metrics.em_top()),
        stroke: Rgba::RED,
        width: SIDE_INDICATOR_WIDTH,
    });

    let alpha = ((1.0 / siblings.len() as f64 + style.opacity) / 2.0) as f32;
    for sibling in siblings {
        let Some(sibling_width) = font.width(&layer, sibling) else {
            continue;
        };
        let dx = match side {
            Side::Left => 0.0,
            Side::Right => width - sibling_width,
        };
        let alpha = if sibling == glyph { SOURCE_ALPHA } else { alpha };
        commands.push(DrawCommand::Glyph {
            layer: layer.clone(),
            glyph: sibling.clone(),
            dx,
            fill: style.ink().with_alpha(alpha),
        });
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::memory::DEFAULT_LAYER;
    use crate::font_source::{FontMetrics, MemoryFont, MemoryGlyph};

    fn font() -> MemoryFont {
        let mut font = MemoryFont::new();
        font.set_metrics(FontMetrics {
            units_per_em: 1000.0,
            descender: -250.0,
        });
        font.insert_glyph(DEFAULT_LAYER, "n", MemoryGlyph::new(550.0).with_rect(40.0, 0.0, 500.0, 500.0));
        font.insert_glyph(DEFAULT_LAYER, "m", MemoryGlyph::new(870.0).with_rect(40.0, 0.0, 800.0, 500.0));
        font
    }

    fn siblings() -> Vec<String> {
        vec!["n".to_string(), "m".to_string(), "ghost".to_string()]
    }

    #[test]
    fn test_right_side_preview() {
        let commands = render_preview(&font(), "n", &siblings(), Side::Right, &PreviewStyle::default());
        assert_eq!(commands.len(), 4);

        assert!(matches!(
            &commands[0],
            DrawCommand::Glyph { glyph, fill, .. } if glyph == "n" && *fill == Rgba::WHITE
        ));
        assert_eq!(
            commands[1],
            DrawCommand::Line {
                from: Point::new(550.0, -250.0),
                to: Point::new(550.0, 750.0),
                stroke: Rgba::RED,
                width: SIDE_INDICATOR_WIDTH,
            }
        );
        let DrawCommand::Glyph { glyph, dx, fill, .. } = &commands[3] else {
            panic!("expected a glyph command");
        };
        assert_eq!(glyph, "m");
        assert_eq!(*dx, -320.0);
        // (1/3 + 0.4) / 2
        assert!((fill.a - 0.366_666_7).abs() < 1e-5);
    }

    #[test]
    fn test_left_side_shares_origin() {
        let commands = render_preview(&font(), "n", &siblings(), Side::Left, &PreviewStyle::default());
        assert!(matches!(
            &commands[1],
            DrawCommand::Line { from, .. } if from.x == 0.0
        ));
        assert!(commands[2..].iter().all(|command| matches!(
            command,
            DrawCommand::Glyph { dx, .. } if *dx == 0.0
        )));
    }

    #[test]
    fn test_source_alpha_and_inverse_colors() {
        let style = PreviewStyle {
            inverse: true,
            ..PreviewStyle::default()
        };
        let commands = render_preview(&font(), "n", &siblings(), Side::Right, &style);
        let DrawCommand::Glyph { fill, .. } = &commands[2] else {
            panic!("expected a glyph command");
        };
        assert_eq!(*fill, Rgba::WHITE.with_alpha(0.4));
    }

    #[test]
    fn test_no_siblings_no_commands() {
        assert!(render_preview(&font(), "n", &[], Side::Right, &PreviewStyle::default()).is_empty());
        assert!(render_preview(&font(), "x", &siblings(), Side::Right, &PreviewStyle::default()).is_empty());
    }

    #[test]
    fn test_opacity_is_clamped() {
        assert_eq!(PreviewStyle::default().with_opacity(2.0).opacity, 0.9);
        assert_eq!(PreviewStyle::default().with_opacity(-1.0).opacity, 0.0);
    }
}
