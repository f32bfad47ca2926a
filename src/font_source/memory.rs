//! In-memory font
//!
//! A small, self-contained [`SpacingFont`] with named layers, groups kept in
//! insertion order and kurbo outlines. Undo and change notifications are
//! recorded as [`UndoEvent`]s so callers can inspect what an operation did.

use super::{FontMetrics, SpacingFont};
use crate::core::errors::{SpacingError, SpacingResult};
use crate::geometry::{outline_bounds, translate_outline, x_crossings};
use kurbo::{BezPath, Line, Rect, Shape};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Name of the layer a new [`MemoryFont`] starts with
pub const DEFAULT_LAYER: &str = "public.default";

/// A glyph: advance width and outline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGlyph {
    pub width: f64,
    pub outline: Vec<BezPath>,
}

impl MemoryGlyph {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            outline: Vec::new(),
        }
    }

    /// Add a rectangular contour
    pub fn with_rect(mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        self.outline.push(Rect::new(x0, y0, x1, y1).to_path(0.1));
        self
    }

    pub fn with_path(mut self, path: BezPath) -> Self {
        self.outline.push(path);
        self
    }

    pub fn bounds(&self) -> Option<Rect> {
        outline_bounds(&self.outline)
    }
}

/// Host notifications recorded by [`MemoryFont`]
#[derive(Debug, Clone, PartialEq)]
pub enum UndoEvent {
    Begin {
        layer: String,
        glyph: String,
        label: String,
    },
    Commit {
        layer: String,
        glyph: String,
    },
    Abort {
        layer: String,
        glyph: String,
    },
    Changed {
        layer: String,
        glyph: String,
    },
}

#[derive(Debug, Clone)]
struct MemoryLayer {
    name: String,
    glyphs: BTreeMap<String, MemoryGlyph>,
}

#[derive(Debug, Clone)]
pub struct MemoryFont {
    groups: Vec<(String, Vec<String>)>,
    layers: Vec<MemoryLayer>,
    current: usize,
    metrics: FontMetrics,
    snapshots: HashMap<(String, String), MemoryGlyph>,
    events: Vec<UndoEvent>,
    locked: BTreeSet<(String, String)>,
}

impl Default for MemoryFont {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFont {
    /// A font with a single empty default layer
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            layers: vec![MemoryLayer {
                name: DEFAULT_LAYER.to_string(),
                glyphs: BTreeMap::new(),
            }],
            current: 0,
            metrics: FontMetrics::default(),
            snapshots: HashMap::new(),
            events: Vec::new(),
            locked: BTreeSet::new(),
        }
    }

    /// Append a layer, keeping declaration order. Existing layers are left alone.
    pub fn add_layer(&mut self, name: &str) {
        if self.layer_index(name).is_none() {
            self.layers.push(MemoryLayer {
                name: name.to_string(),
                glyphs: BTreeMap::new(),
            });
        }
    }

    pub fn set_current_layer(&mut self, name: &str) -> SpacingResult<()> {
        self.current = self
            .layer_index(name)
            .ok_or_else(|| SpacingError::UnknownLayer(name.to_string()))?;
        Ok(())
    }

    /// Insert or replace a glyph, creating the layer if needed
    pub fn insert_glyph(&mut self, layer: &str, name: &str, glyph: MemoryGlyph) {
        self.add_layer(layer);
        if let Some(index) = self.layer_index(layer) {
            self.layers[index].glyphs.insert(name.to_string(), glyph);
        }
    }

    /// Insert or replace a group. A replaced group keeps its position.
    pub fn insert_group(&mut self, name: &str, members: &[&str]) {
        let members = members.iter().map(|m| m.to_string()).collect();
        self.put_group(name.to_string(), members);
    }

    pub fn glyph(&self, layer: &str, name: &str) -> Option<&MemoryGlyph> {
        self.layer(layer)?.glyphs.get(name)
    }

    pub fn set_metrics(&mut self, metrics: FontMetrics) {
        self.metrics = metrics;
    }

    /// Undo and change notifications received so far
    pub fn events(&self) -> &[UndoEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Refuse margin edits to a glyph until it is unlocked
    pub fn lock_glyph(&mut self, layer: &str, name: &str) {
        self.locked.insert((layer.to_string(), name.to_string()));
    }

    pub fn unlock_glyph(&mut self, layer: &str, name: &str) {
        self.locked.remove(&(layer.to_string(), name.to_string()));
    }

    fn put_group(&mut self, name: String, members: Vec<String>) {
        match self.groups.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = members,
            None => self.groups.push((name, members)),
        }
    }

    fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.name == name)
    }

    fn layer(&self, name: &str) -> Option<&MemoryLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    fn glyph_mut(&mut self, layer: &str, name: &str) -> SpacingResult<&mut MemoryGlyph> {
        if self.locked.contains(&(layer.to_string(), name.to_string())) {
            return Err(SpacingError::Locked {
                layer: layer.to_string(),
                glyph: name.to_string(),
            });
        }
        self.stored_glyph_mut(layer, name)
    }

    fn stored_glyph_mut(&mut self, layer: &str, name: &str) -> SpacingResult<&mut MemoryGlyph> {
        let index = self
            .layer_index(layer)
            .ok_or_else(|| SpacingError::UnknownLayer(layer.to_string()))?;
        self.layers[index]
            .glyphs
            .get_mut(name)
            .ok_or_else(|| SpacingError::UnknownGlyph {
                layer: layer.to_string(),
                glyph: name.to_string(),
            })
    }

    fn bounds_or_err(glyph: &MemoryGlyph, layer: &str, name: &str) -> SpacingResult<Rect> {
        glyph.bounds().ok_or_else(|| SpacingError::EmptyGlyph {
            layer: layer.to_string(),
            glyph: name.to_string(),
        })
    }
}

impl SpacingFont for MemoryFont {
    fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|(name, _)| name.clone()).collect()
    }

    fn group(&self, name: &str) -> Option<Vec<String>> {
        self.groups
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, members)| members.clone())
    }

    fn set_groups(&mut self, groups: BTreeMap<String, Vec<String>>) -> SpacingResult<()> {
        if let Some(name) = groups.keys().find(|name| name.is_empty()) {
            return Err(SpacingError::InvalidName {
                name: name.clone(),
                reason: "group names cannot be empty".to_string(),
            });
        }
        for (name, members) in groups {
            self.put_group(name, members);
        }
        Ok(())
    }

    fn layer_names(&self) -> Vec<String> {
        self.layers.iter().map(|layer| layer.name.clone()).collect()
    }

    fn current_layer(&self) -> String {
        self.layers[self.current].name.clone()
    }

    fn has_glyph(&self, layer: &str, glyph: &str) -> bool {
        self.glyph(layer, glyph).is_some()
    }

    fn width(&self, layer: &str, glyph: &str) -> Option<f64> {
        self.glyph(layer, glyph).map(|g| g.width)
    }

    fn bounds(&self, layer: &str, glyph: &str) -> Option<Rect> {
        self.glyph(layer, glyph)?.bounds()
    }

    fn intersect(&self, layer: &str, glyph: &str, line: Line) -> Vec<f64> {
        self.glyph(layer, glyph)
            .map(|g| x_crossings(&g.outline, &line))
            .unwrap_or_default()
    }

    fn set_left_margin(&mut self, layer: &str, glyph: &str, value: f64) -> SpacingResult<()> {
        let target = self.glyph_mut(layer, glyph)?;
        let bounds = Self::bounds_or_err(target, layer, glyph)?;
        let dx = value - bounds.x0;
        translate_outline(&mut target.outline, dx);
        target.width += dx;
        Ok(())
    }

    fn set_right_margin(&mut self, layer: &str, glyph: &str, value: f64) -> SpacingResult<()> {
        let target = self.glyph_mut(layer, glyph)?;
        let bounds = Self::bounds_or_err(target, layer, glyph)?;
        target.width = bounds.x1 + value;
        Ok(())
    }

    fn begin_undo(&mut self, layer: &str, glyph: &str, label: &str) {
        if let Some(current) = self.glyph(layer, glyph).cloned() {
            self.snapshots
                .insert((layer.to_string(), glyph.to_string()), current);
        }
        self.events.push(UndoEvent::Begin {
            layer: layer.to_string(),
            glyph: glyph.to_string(),
            label: label.to_string(),
        });
    }

    fn commit_undo(&mut self, layer: &str, glyph: &str) {
        self.snapshots
            .remove(&(layer.to_string(), glyph.to_string()));
        self.events.push(UndoEvent::Commit {
            layer: layer.to_string(),
            glyph: glyph.to_string(),
        });
    }

    fn abort_undo(&mut self, layer: &str, glyph: &str) {
        if let Some(saved) = self
            .snapshots
            .remove(&(layer.to_string(), glyph.to_string()))
        {
            if let Ok(target) = self.stored_glyph_mut(layer, glyph) {
                *target = saved;
            }
        }
        self.events.push(UndoEvent::Abort {
            layer: layer.to_string(),
            glyph: glyph.to_string(),
        });
    }

    fn changed(&mut self, layer: &str, glyph: &str) {
        self.events.push(UndoEvent::Changed {
            layer: layer.to_string(),
            glyph: glyph.to_string(),
        });
    }

    fn vertical_metrics(&self) -> FontMetrics {
        self.metrics
    }
}
