//! Effective settings
//!
//! CLI flags win over the config file, which wins over built-in defaults.

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::spacing::{PreviewStyle, SidePrefixes};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub prefixes: SidePrefixes,
    pub verbose: bool,
    pub preview_opacity: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefixes: SidePrefixes::default(),
            verbose: false,
            preview_opacity: PreviewStyle::default().opacity,
        }
    }
}

impl Settings {
    pub fn resolve(cli: &CliArgs, config: Option<&ConfigFile>) -> Self {
        let defaults = Self::default();
        let config = config.cloned().unwrap_or_default();

        let left = cli
            .left_prefix
            .clone()
            .or(config.left_prefix)
            .unwrap_or(defaults.prefixes.left);
        let right = cli
            .right_prefix
            .clone()
            .or(config.right_prefix)
            .unwrap_or(defaults.prefixes.right);

        // A bare --verbose can only turn it on
        let verbose = cli.verbose || config.verbose.unwrap_or(defaults.verbose);

        let preview_opacity = config
            .preview_opacity
            .unwrap_or(defaults.preview_opacity)
            .clamp(0.0, PreviewStyle::MAX_OPACITY);

        Self {
            prefixes: SidePrefixes::new(left, right),
            verbose,
            preview_opacity,
        }
    }

    pub fn preview_style(&self, opacity: Option<f64>) -> PreviewStyle {
        PreviewStyle::default().with_opacity(opacity.unwrap_or(self.preview_opacity))
    }
}
