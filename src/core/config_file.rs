//! User configuration file handling
//!
//! Manages settings from ~/.config/bezy/spacing.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration from ~/.config/bezy/spacing.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    /// Prefix of left-side spacing groups (e.g., "public.kern2.")
    pub left_prefix: Option<String>,
    /// Prefix of right-side spacing groups (e.g., "public.kern1.")
    pub right_prefix: Option<String>,
    /// Log every margin transfer at info level
    pub verbose: Option<bool>,
    /// Sibling fill opacity in previews
    pub preview_opacity: Option<f64>,
}

impl ConfigFile {
    /// Get the path to the bezy config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("bezy")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("spacing.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!("Loaded spacing settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        tracing::debug!("Saved spacing settings to {:?}", path);
        Ok(())
    }

    /// The built-in defaults, written out by `init-config`
    pub fn defaults() -> Self {
        let settings = crate::core::settings::Settings::default();
        Self {
            left_prefix: Some(settings.prefixes.left),
            right_prefix: Some(settings.prefixes.right),
            verbose: Some(settings.verbose),
            preview_opacity: Some(settings.preview_opacity),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/bezy directory structure
    /// 2. A spacing.json file with default values
    /// 3. A logs/ directory for log files
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();

        // Create the main config directory
        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = crate::logging::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::defaults().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View logs written with --log-file in: {:?}", logs_dir);

        Ok(())
    }
}
