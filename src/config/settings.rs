//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::progression::EngineOptions;

/// Which backend holds progress records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// One JSON file per user under `data_dir`
    #[default]
    Json,
    /// `progress.db` under `data_dir`
    Sqlite,
    /// Nothing survives the process; useful for dry runs
    Memory,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

/// General settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Progress storage backend
    #[serde(default)]
    pub store: StoreKind,

    /// Directory for stored progress (defaults to ~/.creatorxp/data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Count the daily streak twice per `add_daily_streak`, as older
    /// releases did. Only needed when resuming records written by them.
    #[serde(default = "default_legacy_streak_double_count")]
    pub legacy_streak_double_count: bool,
}

fn default_legacy_streak_double_count() -> bool {
    false
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreKind::default(),
            data_dir: None,
            legacy_streak_double_count: default_legacy_streak_double_count(),
        }
    }
}

impl Settings {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            legacy_streak_double_count: self.legacy_streak_double_count,
        }
    }
}
