//! Margin transfer across a spacing group
//!
//! Copies the left or right margin of a source glyph to its siblings,
//! either as an absolute value or, with a beam, as a shift that lines up the
//! siblings' visual edge at the beam height with the source's.
//!
//! Layers are the outer loop and siblings the inner loop, siblings in the
//! order given. The source glyph is never edited: any sibling with the
//! source's name is left out. Every sibling edit is its own undo
//! transaction; a sibling that cannot be edited is recorded as skipped and
//! the batch carries on, so earlier siblings stay updated.

use super::margins::margins;
use super::side::Side;
use crate::core::errors::{SpacingError, SpacingResult};
use crate::font_source::SpacingFont;
use serde::Serialize;
use std::fmt;

/// A margin transfer request
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub source: String,
    pub siblings: Vec<String>,
    pub side: Side,
    pub beam: Option<f64>,
    pub all_layers: bool,
    pub verbose: bool,
}

impl Transfer {
    pub fn new(source: impl Into<String>, siblings: Vec<String>, side: Side) -> Self {
        Self {
            source: source.into(),
            siblings,
            side,
            beam: None,
            all_layers: false,
            verbose: false,
        }
    }

    pub fn with_beam(mut self, beam: Option<f64>) -> Self {
        self.beam = beam;
        self
    }

    pub fn with_all_layers(mut self, all_layers: bool) -> Self {
        self.all_layers = all_layers;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Siblings that will be edited: everything except the source
    pub fn targets(&self) -> Vec<String> {
        self.siblings
            .iter()
            .filter(|name| **name != self.source)
            .cloned()
            .collect()
    }
}

/// One sibling margin that was changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginChange {
    pub layer: String,
    pub glyph: String,
    /// Stored margin before the edit
    pub before: f64,
    /// Stored margin after the edit
    pub after: f64,
    pub delta: f64,
}

/// Why a sibling was left alone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SkipReason {
    MissingInLayer,
    EmptyGlyph,
    NoMarginsAtBeam,
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingInLayer => f.write_str("not in layer"),
            SkipReason::EmptyGlyph => f.write_str("empty glyph"),
            SkipReason::NoMarginsAtBeam => f.write_str("beam misses the outline"),
            SkipReason::Failed(error) => write!(f, "failed: {error}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skipped {
    pub layer: String,
    pub glyph: String,
    pub reason: SkipReason,
}

/// What a transfer did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferReport {
    pub source: String,
    pub side: Side,
    pub beam: Option<f64>,
    /// The source margin that was transferred; `None` if the source could
    /// not be measured and nothing was done
    pub value: Option<f64>,
    pub layers: Vec<String>,
    pub targets: Vec<String>,
    pub changes: Vec<MarginChange>,
    pub skipped: Vec<Skipped>,
}

impl TransferReport {
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Copy the source glyph's margin on `transfer.side` to its siblings.
///
/// The source is measured in the current layer. Without a beam each sibling
/// gets exactly the source margin. With a beam, the difference between the
/// source's and the sibling's margins at the beam is added to the sibling's
/// stored margin.
pub fn propagate<F: SpacingFont + ?Sized>(
    font: &mut F,
    transfer: &Transfer,
) -> SpacingResult<TransferReport> {
    let current_layer = font.current_layer();
    if !font.has_glyph(&current_layer, &transfer.source) {
        return Err(SpacingError::UnknownGlyph {
            layer: current_layer,
            glyph: transfer.source.clone(),
        });
    }

    let layers = if transfer.all_layers {
        font.layer_names()
    } else {
        vec![current_layer.clone()]
    };

    let mut report = TransferReport {
        source: transfer.source.clone(),
        side: transfer.side,
        beam: transfer.beam,
        value: None,
        layers,
        targets: transfer.targets(),
        changes: Vec::new(),
        skipped: Vec::new(),
    };

    let Some(source_margins) = margins(font, &current_layer, &transfer.source, transfer.beam)
    else {
        tracing::warn!(
            "No {} margin to copy from '{}'{}",
            transfer.side,
            transfer.source,
            if transfer.beam.is_some() { " at the beam" } else { "" }
        );
        return Ok(report);
    };
    let value = source_margins.get(transfer.side);
    report.value = Some(value);

    log_header(&report, transfer.verbose);

    let label = format!("copy {} margin", transfer.side);
    for layer in &report.layers {
        for glyph in &report.targets {
            match transfer_one(font, layer, glyph, transfer, value, &label) {
                Ok(change) => {
                    tracing::debug!(
                        "{}/{}: {} margin {} -> {} ({:+})",
                        layer,
                        glyph,
                        transfer.side,
                        change.before,
                        change.after,
                        change.delta
                    );
                    report.changes.push(change);
                }
                Err(reason) => {
                    tracing::debug!("Skipping {}/{}: {}", layer, glyph, reason);
                    report.skipped.push(Skipped {
                        layer: layer.clone(),
                        glyph: glyph.clone(),
                        reason,
                    });
                }
            }
        }
    }

    if transfer.verbose {
        tracing::info!("...done.");
    }
    Ok(report)
}

fn transfer_one<F: SpacingFont + ?Sized>(
    font: &mut F,
    layer: &str,
    glyph: &str,
    transfer: &Transfer,
    value: f64,
    label: &str,
) -> Result<MarginChange, SkipReason> {
    if !font.has_glyph(layer, glyph) {
        return Err(SkipReason::MissingInLayer);
    }
    let before = font
        .stored_margins(layer, glyph)
        .ok_or(SkipReason::EmptyGlyph)?
        .get(transfer.side);

    let (after, delta) = match transfer.beam {
        None => (value, value - before),
        Some(_) => {
            let at_beam = margins(font, layer, glyph, transfer.beam)
                .ok_or(SkipReason::NoMarginsAtBeam)?
                .get(transfer.side);
            let delta = value - at_beam;
            (before + delta, delta)
        }
    };

    font.begin_undo(layer, glyph, label);
    if let Err(error) = font.set_margin(layer, glyph, transfer.side, after) {
        font.abort_undo(layer, glyph);
        return Err(SkipReason::Failed(error.to_string()));
    }
    font.commit_undo(layer, glyph);
    font.changed(layer, glyph);

    Ok(MarginChange {
        layer: layer.to_string(),
        glyph: glyph.to_string(),
        before,
        after,
        delta,
    })
}

fn log_header(report: &TransferReport, verbose: bool) {
    let value = report.value.unwrap_or_default();
    let beam = if report.beam.is_some() { " (beam)" } else { "" };
    if verbose {
        tracing::info!("transferring {} margins...", report.side);
        tracing::info!("  value   : {}{}", value, beam);
        tracing::info!("  layers  : {}", report.layers.join(" "));
        tracing::info!("  source  : {}", report.source);
        tracing::info!("  targets : {}", report.targets.join(" "));
    } else {
        tracing::debug!(
            "{} ({}) -> {}",
            report.source,
            report.side.letter(),
            report.targets.join(" ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::memory::DEFAULT_LAYER;
    use crate::font_source::{MemoryFont, MemoryGlyph, UndoEvent};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// n: right margin 50, h: 30, m: 70
    fn font() -> MemoryFont {
        let mut font = MemoryFont::new();
        font.insert_glyph(DEFAULT_LAYER, "n", MemoryGlyph::new(550.0).with_rect(40.0, 0.0, 500.0, 500.0));
        font.insert_glyph(DEFAULT_LAYER, "h", MemoryGlyph::new(530.0).with_rect(40.0, 0.0, 500.0, 750.0));
        font.insert_glyph(DEFAULT_LAYER, "m", MemoryGlyph::new(870.0).with_rect(40.0, 0.0, 800.0, 500.0));
        font.insert_group("public.kern1.n", &["n", "h", "m"]);
        font
    }

    fn right_margin(font: &MemoryFont, layer: &str, glyph: &str) -> f64 {
        font.stored_margins(layer, glyph).unwrap().right
    }

    #[test]
    fn test_copy_right_margin() {
        let mut font = font();
        let transfer = Transfer::new("n", names(&["n", "h", "m"]), Side::Right);
        let report = propagate(&mut font, &transfer).unwrap();

        assert_eq!(report.value, Some(50.0));
        assert_eq!(report.targets, names(&["h", "m"]));
        assert_eq!(right_margin(&font, DEFAULT_LAYER, "h"), 50.0);
        assert_eq!(right_margin(&font, DEFAULT_LAYER, "m"), 50.0);
        assert_eq!(report.changes.len(), 2);
        assert_eq!(report.changes[0].delta, 20.0);
        assert_eq!(report.changes[1].delta, -20.0);
    }

    #[test]
    fn test_copy_left_margin_keeps_right() {
        let mut font = font();
        font.set_left_margin(DEFAULT_LAYER, "n", 60.0).unwrap();
        let transfer = Transfer::new("n", names(&["n", "h"]), Side::Left);
        propagate(&mut font, &transfer).unwrap();

        let h = font.stored_margins(DEFAULT_LAYER, "h").unwrap();
        assert_eq!(h.left, 60.0);
        assert_eq!(h.right, 30.0);
    }

    #[test]
    fn test_source_is_never_edited() {
        let mut font = font();
        let transfer = Transfer::new("n", names(&["n", "h"]), Side::Right);
        propagate(&mut font, &transfer).unwrap();
        assert!(!font.events().iter().any(|event| matches!(
            event,
            UndoEvent::Begin { glyph, .. } if glyph == "n"
        )));
    }

    #[test]
    fn test_each_sibling_is_one_transaction() {
        let mut font = font();
        let transfer = Transfer::new("n", names(&["n", "h"]), Side::Right);
        propagate(&mut font, &transfer).unwrap();
        let events = font.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], UndoEvent::Begin { glyph, .. } if glyph == "h"));
        assert!(matches!(&events[1], UndoEvent::Commit { glyph, .. } if glyph == "h"));
        assert!(matches!(&events[2], UndoEvent::Changed { glyph, .. } if glyph == "h"));
    }

    #[test]
    fn test_beam_transfer_shifts_by_visual_difference() {
        let mut font = MemoryFont::new();
        // n: stored right margin 50, 56 at the beam
        let mut n = kurbo::BezPath::new();
        n.move_to((40.0, 0.0));
        n.line_to((500.0, 0.0));
        n.line_to((500.0, 200.0));
        n.line_to((488.0, 400.0));
        n.line_to((40.0, 400.0));
        n.close_path();
        font.insert_glyph(DEFAULT_LAYER, "n", MemoryGlyph::new(550.0).with_path(n));
        // h: stored right margin 30, 44 at the beam
        let mut h = kurbo::BezPath::new();
        h.move_to((40.0, 0.0));
        h.line_to((500.0, 0.0));
        h.line_to((500.0, 200.0));
        h.line_to((472.0, 400.0));
        h.line_to((40.0, 400.0));
        h.close_path();
        font.insert_glyph(DEFAULT_LAYER, "h", MemoryGlyph::new(530.0).with_path(h));

        let transfer = Transfer::new("n", names(&["n", "h"]), Side::Right).with_beam(Some(300.0));
        let report = propagate(&mut font, &transfer).unwrap();

        let value = report.value.unwrap();
        assert!((value - 56.0).abs() < 1e-9);
        let change = &report.changes[0];
        assert!((change.delta - 12.0).abs() < 1e-9);
        assert!((right_margin(&font, DEFAULT_LAYER, "h") - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_missing_siblings_are_skipped() {
        let mut font = font();
        font.insert_glyph(DEFAULT_LAYER, "space", MemoryGlyph::new(250.0));
        let transfer = Transfer::new("n", names(&["n", "space", "ghost", "h"]), Side::Right);
        let report = propagate(&mut font, &transfer).unwrap();

        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].reason, SkipReason::EmptyGlyph);
        assert_eq!(report.skipped[1].reason, SkipReason::MissingInLayer);
        assert_eq!(right_margin(&font, DEFAULT_LAYER, "h"), 50.0);
    }

    #[test]
    fn test_failed_edit_is_rolled_back_and_batch_continues() {
        let mut font = font();
        font.lock_glyph(DEFAULT_LAYER, "h");
        let transfer = Transfer::new("n", names(&["n", "h", "m"]), Side::Right);
        let report = propagate(&mut font, &transfer).unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].glyph, "h");
        assert!(matches!(report.skipped[0].reason, SkipReason::Failed(_)));
        assert_eq!(right_margin(&font, DEFAULT_LAYER, "h"), 30.0);

        // m comes after the failure and is still updated
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].glyph, "m");
        assert_eq!(right_margin(&font, DEFAULT_LAYER, "m"), 50.0);

        let h_events: Vec<&UndoEvent> = font
            .events()
            .iter()
            .filter(|event| match event {
                UndoEvent::Begin { glyph, .. }
                | UndoEvent::Commit { glyph, .. }
                | UndoEvent::Abort { glyph, .. }
                | UndoEvent::Changed { glyph, .. } => glyph == "h",
            })
            .collect();
        assert_eq!(h_events.len(), 2);
        assert!(matches!(h_events[0], UndoEvent::Begin { .. }));
        assert!(matches!(h_events[1], UndoEvent::Abort { .. }));
    }

    #[test]
    fn test_sibling_missed_by_beam_is_skipped() {
        let mut font = font();
        font.insert_glyph(DEFAULT_LAYER, "period", MemoryGlyph::new(200.0).with_rect(50.0, 0.0, 150.0, 100.0));
        let transfer =
            Transfer::new("n", names(&["n", "period", "h"]), Side::Right).with_beam(Some(300.0));
        let report = propagate(&mut font, &transfer).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::NoMarginsAtBeam);
        assert_eq!(font.width(DEFAULT_LAYER, "period"), Some(200.0));
        assert_eq!(report.changes.len(), 1);
    }

    #[test]
    fn test_unmeasurable_source_is_a_noop() {
        let mut font = font();
        let transfer = Transfer::new("n", names(&["n", "h"]), Side::Right).with_beam(Some(2000.0));
        let report = propagate(&mut font, &transfer).unwrap();
        assert!(report.is_noop());
        assert_eq!(report.value, None);
        assert!(font.events().is_empty());
    }

    #[test]
    fn test_unknown_source() {
        let mut font = font();
        let transfer = Transfer::new("x", names(&["x", "h"]), Side::Right);
        assert!(matches!(
            propagate(&mut font, &transfer),
            Err(SpacingError::UnknownGlyph { .. })
        ));
    }

    #[test]
    fn test_all_layers() {
        let mut font = font();
        font.insert_glyph("bold", "h", MemoryGlyph::new(600.0).with_rect(60.0, 0.0, 520.0, 750.0));
        font.insert_glyph("bold", "n", MemoryGlyph::new(600.0).with_rect(60.0, 0.0, 540.0, 500.0));

        let transfer = Transfer::new("n", names(&["n", "h", "m"]), Side::Right).with_all_layers(true);
        let report = propagate(&mut font, &transfer).unwrap();

        assert_eq!(report.layers, names(&[DEFAULT_LAYER, "bold"]));
        // The value comes from the current layer's source
        assert_eq!(right_margin(&font, "bold", "h"), 50.0);
        // m is missing in bold, the bold n is the source and stays as is
        assert_eq!(right_margin(&font, "bold", "n"), 60.0);
        assert_eq!(report.changes.len(), 3);
        assert_eq!(report.skipped.len(), 1);
    }
}
