//! Configuration loading and management
//!
//! A config file carries general settings plus optional replacements for the
//! built-in level, achievement, and rule tables. Tables are validated as a
//! whole through [`Catalog::new`] before the engine sees them.

mod io;
mod settings;

pub use settings::{Settings, StoreKind};

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::progression::{Achievement, Catalog, Level, ProgressionEngine, Rule};
use crate::store::{JsonFileStore, MemoryStore, ProgressStore, SqliteStore};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Level table (built-in table when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<Level>>,

    /// Achievement table (built-in table when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<Achievement>>,

    /// Unlock rules (built-in rules when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
}

impl Config {
    /// Config with every table spelled out, for `init`
    pub fn with_defaults() -> Self {
        let builtin = Catalog::builtin();
        Self {
            settings: Settings::default(),
            levels: Some(builtin.levels().iter().cloned().collect()),
            achievements: Some(builtin.achievements().iter().cloned().collect()),
            rules: Some(builtin.rules().iter().cloned().collect()),
        }
    }

    /// Build the catalog described by this config.
    ///
    /// Tables left out fall back to the built-in ones individually.
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        if self.levels.is_none() && self.achievements.is_none() && self.rules.is_none() {
            return Ok(Catalog::builtin());
        }

        let builtin = Catalog::builtin();
        let levels = self
            .levels
            .clone()
            .unwrap_or_else(|| builtin.levels().iter().cloned().collect());
        let achievements = self
            .achievements
            .clone()
            .unwrap_or_else(|| builtin.achievements().iter().cloned().collect());
        let rules = self
            .rules
            .clone()
            .unwrap_or_else(|| builtin.rules().iter().cloned().collect());

        let catalog =
            Catalog::new(levels, achievements, rules).context("Invalid catalog in config")?;
        Ok(Arc::new(catalog))
    }

    pub fn engine(&self) -> Result<ProgressionEngine> {
        Ok(ProgressionEngine::new(self.catalog()?).with_options(self.settings.engine_options()))
    }

    /// Directory holding progress data
    pub fn data_dir(&self) -> PathBuf {
        self.settings
            .data_dir
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("data"))
    }

    /// Open the configured store
    pub fn open_store(&self, catalog: Arc<Catalog>) -> Result<Box<dyn ProgressStore>> {
        let dir = self.data_dir();
        tracing::debug!(
            "Opening {} store at {}",
            self.settings.store.as_str(),
            dir.display()
        );
        let store: Box<dyn ProgressStore> = match self.settings.store {
            StoreKind::Json => Box::new(JsonFileStore::open(&dir)?),
            StoreKind::Sqlite => Box::new(SqliteStore::open(&dir.join("progress.db"), catalog)?),
            StoreKind::Memory => Box::new(MemoryStore::new()),
        };
        Ok(store)
    }
}
