//! Configuration file I/O operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Config;

impl Config {
    /// Get the global config directory path (~/.creatorxp/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".creatorxp")
    }

    /// Get the global config file path (~/.creatorxp/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path`, or from the global config path when `None`.
    ///
    /// A missing file yields the built-in defaults; an unreadable or
    /// malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::global_config_path);

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    /// Save configuration to a file, creating the parent directory if needed.
    /// The write is atomic and serialized with other writers.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        crate::fsutil::write_atomic(path, content.as_bytes())
    }
}
