//! Font metrics used when building previews
//!
//! Only the vertical extent of the em is needed: the side indicator of a
//! preview runs from the descender to the top of the em square.

use norad::Font;
use serde::Serialize;

/// Vertical font metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontMetrics {
    pub units_per_em: f64,
    pub descender: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::from_units_per_em(1000.0)
    }
}

impl FontMetrics {
    /// Metrics with the descender at -20% of the em
    pub fn from_units_per_em(units_per_em: f64) -> Self {
        Self {
            units_per_em,
            descender: -(units_per_em * 0.2),
        }
    }

    /// Extract metrics from a UFO
    pub fn from_ufo(ufo: &Font) -> Self {
        let font_info = &ufo.font_info;

        let units_per_em = font_info
            .units_per_em
            .map(|v| v.to_string().parse().unwrap_or(1024.0))
            .unwrap_or(1024.0);

        // Load metrics from UFO, using a default based on units_per_em if missing
        let descender = font_info.descender.unwrap_or(-(units_per_em * 0.2));

        Self {
            units_per_em,
            descender,
        }
    }

    /// Top of the em square
    pub fn em_top(&self) -> f64 {
        self.descender + self.units_per_em
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_ufo() {
        let font = Font::new();
        let metrics = FontMetrics::from_ufo(&font);
        assert_eq!(metrics.units_per_em, 1024.0);
        assert!((metrics.descender + 204.8).abs() < 1e-9);
    }

    #[test]
    fn test_em_top() {
        let metrics = FontMetrics {
            units_per_em: 1000.0,
            descender: -250.0,
        };
        assert_eq!(metrics.em_top(), 750.0);
    }
}
