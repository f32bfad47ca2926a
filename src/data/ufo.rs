//! UFO file I/O operations

use anyhow::{Context, Result};
use norad::Font;
use std::path::Path;

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let path = path.as_ref();
    let font = Font::load(path).with_context(|| format!("Failed to load UFO {}", path.display()))?;
    tracing::debug!("Loaded UFO {:?}", path);
    Ok(font)
}

/// Write a UFO font back to disk
pub fn save_ufo_to_path(font: &Font, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    font.save(path)
        .with_context(|| format!("Failed to save UFO {}", path.display()))?;
    tracing::debug!("Saved UFO {:?}", path);
    Ok(())
}
