//! Combined, validated catalog of levels, achievements and unlock rules

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;

use super::definitions::{Achievement, AchievementCatalog};
use super::levels::{Level, LevelCatalog};
use super::rules::{Rule, RuleSet};

/// Malformed catalog data, rejected at load time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("level catalog is empty")]
    NoLevels,

    #[error("first level must be level 1, found level {0}")]
    FirstLevelNumber(u32),

    #[error("first level must require 0 XP, found {0}")]
    FirstLevelThreshold(u64),

    #[error("levels must be numbered consecutively: expected level {expected}, found {found}")]
    LevelSequence { expected: u32, found: u32 },

    #[error("level {level} requires {xp_required} XP, which is not above the previous level's {previous}")]
    ThresholdNotIncreasing {
        level: u32,
        xp_required: u64,
        previous: u64,
    },

    #[error("achievement id must not be empty")]
    EmptyAchievementId,

    #[error("duplicate achievement id: {0}")]
    DuplicateAchievement(String),

    #[error("rule for '{source_tag}' unlocks unknown achievement '{achievement}'")]
    UnknownRuleAchievement {
        source_tag: String,
        achievement: String,
    },
}

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| {
    Arc::new(Catalog {
        levels: LevelCatalog::builtin(),
        achievements: AchievementCatalog::builtin(),
        rules: RuleSet::builtin(),
    })
});

/// Immutable catalog handed to the engine at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    levels: LevelCatalog,
    achievements: AchievementCatalog,
    rules: RuleSet,
}

impl Catalog {
    pub fn new(
        levels: Vec<Level>,
        achievements: Vec<Achievement>,
        rules: Vec<Rule>,
    ) -> Result<Self, CatalogError> {
        let levels = LevelCatalog::new(levels)?;
        let achievements = AchievementCatalog::new(achievements)?;
        let rules = RuleSet::new(rules, &achievements)?;
        Ok(Self {
            levels,
            achievements,
            rules,
        })
    }

    /// Shared handle to the built-in catalog
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    pub fn levels(&self) -> &LevelCatalog {
        &self.levels
    }

    pub fn achievements(&self) -> &AchievementCatalog {
        &self.achievements
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
