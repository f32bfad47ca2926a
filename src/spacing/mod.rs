//! Group spacing
//!
//! Glyphs sharing a spacing group share a margin on one side. This module
//! finds a glyph's groups and siblings, measures margins (optionally at a
//! beam height), copies a margin across the group, keeps groups in JSON
//! files and builds preview draw commands.

pub mod groups;
pub mod margins;
pub mod preview;
pub mod propagate;
pub mod side;
pub mod store;

// Re-export commonly used items
pub use groups::{groups_for_glyph, make_group, siblings, spacing_groups, MakeGroup, SideGroups};
pub use margins::{margins, BEAM_OVERSHOOT};
pub use preview::{render_preview, DrawCommand, PreviewStyle, Rgba};
pub use propagate::{propagate, MarginChange, SkipReason, Skipped, Transfer, TransferReport};
pub use side::{Side, SidePrefixes, PREFIX_LEFTSIDE, PREFIX_RIGHTSIDE};
pub use store::{export_groups, import_groups, GroupMap, ImportSummary};
