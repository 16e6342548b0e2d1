//! Configuration system for jsonquill.
//!
//! This module provides the configuration structure for jsonquill with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is loaded
//! from a TOML file and merged with command-line arguments.
//!
//! # Example
//!
//! ```
//! use jsonquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.indent_size, 4);
//! assert!(!config.start_locked);
//!
//! // Create custom configuration
//! let custom = Config {
//!     indent_size: 2,
//!     ..Config::default()
//! };
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::document::serializer::DEFAULT_INDENT;

/// Configuration for the jsonquill editor.
///
/// # Fields
///
/// * `indent_size` - Number of spaces per indentation level when saving (default: 4)
/// * `create_backup` - Create .bak files before saving (default: false)
/// * `start_locked` - Start sessions with the structure locked (default: false)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,

    /// Start with the structure locked
    #[serde(default)]
    pub start_locked: bool,
}

/// Returns the default indentation size.
fn default_indent_size() -> usize {
    DEFAULT_INDENT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            create_backup: false,
            start_locked: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/jsonquill/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("jsonquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|_| Self::default()),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string).context("Failed to write config file")?;

        Ok(())
    }
}
