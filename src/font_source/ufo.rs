//! UFO font source
//!
//! [`UfoFont`] adapts a `norad::Font` to [`SpacingFont`]. Outlines are
//! converted to kurbo paths on demand with components decomposed, so
//! composite glyphs are measured the same way as contour glyphs.

use super::{FontMetrics, SpacingFont};
use crate::core::errors::{SpacingError, SpacingResult};
use crate::data::conversions::{glyph_outline, translate_glyph};
use crate::data::ufo::{load_ufo_from_path, save_ufo_to_path};
use crate::geometry::{outline_bounds, x_crossings};
use kurbo::{BezPath, Line, Rect};
use norad::{Font, Glyph, Layer, Name};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// A UFO font opened for group spacing
#[derive(Debug)]
pub struct UfoFont {
    font: Font,
    current_layer: String,
    snapshots: HashMap<(String, String), Glyph>,
    modified: BTreeSet<(String, String)>,
}

impl UfoFont {
    /// Wrap a font; edits target its default layer
    pub fn new(font: Font) -> Self {
        let current_layer = font.default_layer().name().to_string();
        Self {
            font,
            current_layer,
            snapshots: HashMap::new(),
            modified: BTreeSet::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(Self::new(load_ufo_from_path(path)?))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        save_ufo_to_path(&self.font, path)
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn into_inner(self) -> Font {
        self.font
    }

    pub fn set_current_layer(&mut self, name: &str) -> SpacingResult<()> {
        if self.layer(name).is_none() {
            return Err(SpacingError::UnknownLayer(name.to_string()));
        }
        self.current_layer = name.to_string();
        Ok(())
    }

    /// `(layer, glyph)` pairs reported through [`SpacingFont::changed`]
    pub fn modified_glyphs(&self) -> impl Iterator<Item = &(String, String)> {
        self.modified.iter()
    }

    pub fn is_modified(&self) -> bool {
        !self.modified.is_empty()
    }

    fn layer(&self, name: &str) -> Option<&Layer> {
        self.font.layers.get(name)
    }

    fn outline(&self, layer: &str, glyph: &str) -> Option<Vec<BezPath>> {
        let layer = self.layer(layer)?;
        let glyph = layer.get_glyph(glyph)?;
        Some(glyph_outline(glyph, layer, Some(self.font.default_layer())))
    }

    fn glyph_mut(&mut self, layer: &str, glyph: &str) -> SpacingResult<&mut Glyph> {
        self.font
            .layers
            .get_mut(layer)
            .ok_or_else(|| SpacingError::UnknownLayer(layer.to_string()))?
            .get_glyph_mut(glyph)
            .ok_or_else(|| SpacingError::UnknownGlyph {
                layer: layer.to_string(),
                glyph: glyph.to_string(),
            })
    }

    fn bounds_or_err(&self, layer: &str, glyph: &str) -> SpacingResult<Rect> {
        if !self.has_glyph(layer, glyph) {
            return Err(SpacingError::UnknownGlyph {
                layer: layer.to_string(),
                glyph: glyph.to_string(),
            });
        }
        self.bounds(layer, glyph).ok_or_else(|| SpacingError::EmptyGlyph {
            layer: layer.to_string(),
            glyph: glyph.to_string(),
        })
    }
}

fn to_name(name: &str) -> SpacingResult<Name> {
    Name::new(name).map_err(|e| SpacingError::InvalidName {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

impl SpacingFont for UfoFont {
    fn group_names(&self) -> Vec<String> {
        self.font.groups.keys().map(|name| name.to_string()).collect()
    }

    fn group(&self, name: &str) -> Option<Vec<String>> {
        self.font
            .groups
            .get(name)
            .map(|members| members.iter().map(|m| m.to_string()).collect())
    }

    fn set_groups(&mut self, groups: BTreeMap<String, Vec<String>>) -> SpacingResult<()> {
        // Validate every name before touching the font
        let mut converted = Vec::with_capacity(groups.len());
        for (name, members) in &groups {
            let members = members
                .iter()
                .map(|member| to_name(member))
                .collect::<SpacingResult<Vec<_>>>()?;
            converted.push((to_name(name)?, members));
        }
        for (name, members) in converted {
            self.font.groups.insert(name, members);
        }
        Ok(())
    }

    fn layer_names(&self) -> Vec<String> {
        self.font
            .layers
            .iter()
            .map(|layer| layer.name().to_string())
            .collect()
    }

    fn current_layer(&self) -> String {
        self.current_layer.clone()
    }

    fn has_glyph(&self, layer: &str, glyph: &str) -> bool {
        self.layer(layer)
            .is_some_and(|layer| layer.get_glyph(glyph).is_some())
    }

    fn width(&self, layer: &str, glyph: &str) -> Option<f64> {
        self.layer(layer)?.get_glyph(glyph).map(|g| g.width)
    }

    fn bounds(&self, layer: &str, glyph: &str) -> Option<Rect> {
        outline_bounds(&self.outline(layer, glyph)?)
    }

    fn intersect(&self, layer: &str, glyph: &str, line: Line) -> Vec<f64> {
        self.outline(layer, glyph)
            .map(|paths| x_crossings(&paths, &line))
            .unwrap_or_default()
    }

    fn set_left_margin(&mut self, layer: &str, glyph: &str, value: f64) -> SpacingResult<()> {
        let bounds = self.bounds_or_err(layer, glyph)?;
        let dx = value - bounds.x0;
        let target = self.glyph_mut(layer, glyph)?;
        translate_glyph(target, dx);
        target.width += dx;
        Ok(())
    }

    fn set_right_margin(&mut self, layer: &str, glyph: &str, value: f64) -> SpacingResult<()> {
        let bounds = self.bounds_or_err(layer, glyph)?;
        let target = self.glyph_mut(layer, glyph)?;
        target.width = bounds.x1 + value;
        Ok(())
    }

    fn begin_undo(&mut self, layer: &str, glyph: &str, label: &str) {
        let snapshot = self
            .layer(layer)
            .and_then(|l| l.get_glyph(glyph))
            .cloned();
        if let Some(snapshot) = snapshot {
            tracing::trace!("Undo checkpoint '{}' for {}/{}", label, layer, glyph);
            self.snapshots
                .insert((layer.to_string(), glyph.to_string()), snapshot);
        }
    }

    fn commit_undo(&mut self, layer: &str, glyph: &str) {
        self.snapshots
            .remove(&(layer.to_string(), glyph.to_string()));
    }

    fn abort_undo(&mut self, layer: &str, glyph: &str) {
        let Some(saved) = self
            .snapshots
            .remove(&(layer.to_string(), glyph.to_string()))
        else {
            return;
        };
        if let Ok(target) = self.glyph_mut(layer, glyph) {
            *target = saved;
            tracing::debug!("Rolled back {}/{}", layer, glyph);
        }
    }

    fn changed(&mut self, layer: &str, glyph: &str) {
        self.modified
            .insert((layer.to_string(), glyph.to_string()));
    }

    fn vertical_metrics(&self) -> FontMetrics {
        FontMetrics::from_ufo(&self.font)
    }
}
