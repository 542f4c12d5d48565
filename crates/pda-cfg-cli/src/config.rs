//! CLI configuration management.
//!
//! Settings live in a JSON file under the platform config directory. Command-line
//! flags take precedence over the file, and the file over built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use pda_cfg_core::{GeneratorConfig, StateOrder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commands::convert::OutputFormat;

/// Application-wide configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// State enumeration order for push-two rules.
    #[serde(default)]
    pub state_order: StateOrder,

    /// Output format used by `convert` when `--format` is not given.
    #[serde(default)]
    pub default_format: OutputFormat,

    /// File this configuration was loaded from and is saved to.
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`, or from the default config file location.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::config_file_path);

        let mut config = match &path {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;
                let config: Config = serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?;
                debug!(path = %path.display(), "Loaded configuration");
                config
            }
            _ => Self::default(),
        };

        config.path = path;
        Ok(config)
    }

    /// Save current configuration to its config file.
    pub fn save(&self) -> Result<()> {
        let Some(config_path) = self.path() else {
            anyhow::bail!("No config file location available on this platform");
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        debug!(path = %config_path.display(), "Saved configuration");
        Ok(())
    }

    /// The file this configuration reads from and writes to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the path to the default config file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "pda2cfg", "pda2cfg")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Reset every setting to its default, keeping the file location.
    pub fn reset(&mut self) {
        *self = Self {
            path: self.path.take(),
            ..Self::default()
        };
    }

    /// Generator settings, with an optional command-line override.
    pub fn generator_config(&self, order: Option<StateOrder>) -> GeneratorConfig {
        GeneratorConfig {
            state_order: order.unwrap_or(self.state_order),
        }
    }
}
