//! Error types for the spacing core
//!
//! Per-glyph conditions (empty glyph, no margins at the beam) are reported
//! through these types or through skip records, never by panicking.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or mutating glyphs and groups
#[derive(Debug, Error)]
pub enum SpacingError {
    #[error("glyph '{glyph}' not found in layer '{layer}'")]
    UnknownGlyph { layer: String, glyph: String },

    #[error("layer '{0}' not found")]
    UnknownLayer(String),

    #[error("glyph '{glyph}' in layer '{layer}' has no outline")]
    EmptyGlyph { layer: String, glyph: String },

    #[error("glyph '{glyph}' in layer '{layer}' is locked")]
    Locked { layer: String, glyph: String },

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

/// Errors raised by group import and export
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed spacing groups JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Font(#[from] SpacingError),
}

pub type SpacingResult<T> = Result<T, SpacingError>;
