//! Creator progression: XP, levels, streaks, and achievements
//!
//! Catalogs are static configuration, scoring is pure, and the engine turns
//! (record, award) into (updated record, report).

mod catalog;
mod definitions;
mod engine;
mod levels;
mod models;
mod rules;
mod scoring;
mod streaks;

pub use catalog::{Catalog, CatalogError};
pub use definitions::{Achievement, AchievementCatalog, Rarity};
pub use engine::{AwardReport, EngineOptions, ProgressSession, ProgressionEngine};
pub use levels::{Level, LevelCatalog};
pub use models::{ProgressToNext, StatsUpdate, UserProgress, UserStats};
pub use rules::{Counter, EventSource, Rule, RuleSet, Trigger, UnlockRule};
pub use scoring::{Platform, content_plan_xp, post_xp, trend_xp};
pub use streaks::{DAILY_BONUS_CAP, DAILY_BONUS_PER_DAY, Streaks, daily_bonus};
