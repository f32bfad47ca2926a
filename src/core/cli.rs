//! Command line interface for bezy-spacing
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs.

use crate::spacing::Side;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// bezy-spacing CLI arguments
///
/// Examples:
///   bezy-spacing groups MyFont.ufo --glyph n          # Show the groups of n
///   bezy-spacing margins MyFont.ufo n --beam 250      # Margins at y=250
///   bezy-spacing copy MyFont.ufo n --side right       # Copy n's right margin to its group
///   bezy-spacing export MyFont.ufo groups.json        # Save spacing groups to JSON
///   bezy-spacing init-config                          # Write ~/.config/bezy/spacing.json
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "bezy-spacing",
    version,
    about = "Group spacing for UFO font sources",
    long_about = "Glyphs in the same spacing group share a margin on one side. bezy-spacing finds a glyph's spacing groups, measures margins (optionally at a beam height), copies a margin to every glyph in the group and moves groups in and out of JSON files."
)]
pub struct CliArgs {
    /// Log every margin transfer and enable debug output
    #[clap(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Also write logs to ~/.config/bezy/logs/
    #[clap(long = "log-file", global = true)]
    pub log_file: bool,

    /// Prefix of left-side spacing groups
    #[clap(
        long = "left-prefix",
        global = true,
        help = "Prefix of left-side spacing groups",
        long_help = "Prefix of left-side spacing groups. Defaults to the config file value, then to public.kern2."
    )]
    pub left_prefix: Option<String>,

    /// Prefix of right-side spacing groups
    #[clap(
        long = "right-prefix",
        global = true,
        help = "Prefix of right-side spacing groups",
        long_help = "Prefix of right-side spacing groups. Defaults to the config file value, then to public.kern1."
    )]
    pub right_prefix: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List spacing groups, or the groups of one glyph
    Groups {
        ufo: PathBuf,
        #[clap(long)]
        glyph: Option<String>,
    },
    /// List the glyphs sharing a spacing group with GLYPH
    Siblings {
        ufo: PathBuf,
        glyph: String,
        #[clap(long, value_enum)]
        side: Side,
    },
    /// Print a glyph's left and right margins
    Margins {
        ufo: PathBuf,
        glyph: String,
        /// Measure at this height instead of using the bounding box
        #[clap(long)]
        beam: Option<f64>,
        /// Layer to measure in (default layer if omitted)
        #[clap(long)]
        layer: Option<String>,
    },
    /// Copy GLYPH's margin on SIDE to every glyph in its spacing group
    Copy {
        ufo: PathBuf,
        glyph: String,
        #[clap(long, value_enum)]
        side: Side,
        #[clap(long)]
        beam: Option<f64>,
        /// Apply to the siblings in every layer
        #[clap(long = "all-layers")]
        all_layers: bool,
        /// Report the changes without saving the UFO
        #[clap(long = "dry-run")]
        dry_run: bool,
    },
    /// Create a spacing group named after GLYPH containing only GLYPH
    MakeGroup {
        ufo: PathBuf,
        glyph: String,
        #[clap(long, value_enum)]
        side: Side,
        #[clap(long = "dry-run")]
        dry_run: bool,
    },
    /// Write the font's spacing groups to a JSON file
    Export { ufo: PathBuf, json: PathBuf },
    /// Read spacing groups from a JSON file into the font
    Import {
        ufo: PathBuf,
        json: PathBuf,
        #[clap(long = "dry-run")]
        dry_run: bool,
    },
    /// Print preview draw commands for GLYPH and its group as JSON
    Preview {
        ufo: PathBuf,
        glyph: String,
        #[clap(long, value_enum)]
        side: Side,
        #[clap(long)]
        opacity: Option<f64>,
    },
    /// Initialize ~/.config/bezy with a spacing.json and a logs directory
    InitConfig,
}

impl Command {
    /// The UFO the command works on
    pub fn ufo(&self) -> Option<&Path> {
        match self {
            Command::Groups { ufo, .. }
            | Command::Siblings { ufo, .. }
            | Command::Margins { ufo, .. }
            | Command::Copy { ufo, .. }
            | Command::MakeGroup { ufo, .. }
            | Command::Export { ufo, .. }
            | Command::Import { ufo, .. }
            | Command::Preview { ufo, .. } => Some(ufo),
            Command::InitConfig => None,
        }
    }
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that the UFO path exists and is a UFO directory before
    /// anything is loaded, providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = self.command.ufo() {
            validate_ufo_path(path)?;
        }

        if let Command::Import { json, .. } = &self.command {
            if !json.is_file() {
                return Err(format!(
                    "Group file does not exist: {}\nMake sure the path is correct and the file exists.",
                    json.display()
                ));
            }
        }

        for prefix in [&self.left_prefix, &self.right_prefix].into_iter().flatten() {
            if prefix.is_empty() {
                return Err("Group prefixes cannot be empty".to_string());
            }
        }
        if let (Some(left), Some(right)) = (&self.left_prefix, &self.right_prefix) {
            if left == right {
                return Err(format!(
                    "Left and right group prefixes must differ (both are '{left}')"
                ));
            }
        }

        Ok(())
    }
}

fn validate_ufo_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!(
            "Font source does not exist: {}\nMake sure the path is correct and the file exists.",
            path.display()
        ));
    }
    if !path.is_dir() {
        return Err(format!(
            "Not a UFO directory: {}\nOnly UFO sources are supported.",
            path.display()
        ));
    }
    let meta_info = path.join("metainfo.plist");
    if !meta_info.exists() {
        return Err(format!(
            "Not a valid UFO directory: missing metainfo.plist in {}\nMake sure this is a valid UFO directory.",
            path.display()
        ));
    }
    Ok(())
}
