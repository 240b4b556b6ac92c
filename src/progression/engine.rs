//! Progression engine - core gamification logic
//!
//! Applies XP awards to a [`UserProgress`] record, advances levels, evaluates
//! unlock rules, and reports what changed. The engine holds no per-user
//! state; callers own the record and decide when to persist it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::definitions::Achievement;
use super::levels::Level;
use super::models::{ProgressToNext, StatsUpdate, UserProgress};
use super::rules::{Counter, EventSource};
use super::streaks::daily_bonus;

/// Behaviour switches for the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// When set, `add_daily_streak` bumps the daily counter a second time
    /// through the `daily_streak` rule, matching records written by older
    /// versions.
    #[serde(default)]
    pub legacy_streak_double_count: bool,
}

/// Result of a single award
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardReport {
    pub leveled_up: bool,
    pub new_level: Option<Level>,
    pub achievements_unlocked: Vec<Achievement>,
}

impl AwardReport {
    pub fn is_empty(&self) -> bool {
        !self.leveled_up && self.achievements_unlocked.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    catalog: Arc<Catalog>,
    options: EngineOptions,
}

impl ProgressionEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            options: EngineOptions::default(),
        }
    }

    /// Engine over the built-in catalog
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin())
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the catalog, for stores that rehydrate records
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Fresh record for a user seen for the first time
    pub fn new_progress(&self, user_id: impl Into<String>) -> UserProgress {
        let mut progress = UserProgress::new(user_id);
        progress.current_level = self.catalog.levels().first().level;
        progress
    }

    // ========================================
    // AWARDS
    // ========================================

    /// Add XP, advance at most one level, and run the unlock rules for `source`
    pub fn apply_award(
        &self,
        progress: &mut UserProgress,
        amount: u64,
        source: &EventSource,
    ) -> AwardReport {
        self.apply(progress, amount, source, None)
    }

    /// `already_counted` names a counter the caller has bumped for this event;
    /// rules on that counter read it instead of incrementing it again.
    fn apply(
        &self,
        progress: &mut UserProgress,
        amount: u64,
        source: &EventSource,
        already_counted: Option<Counter>,
    ) -> AwardReport {
        let mut report = AwardReport::default();

        progress.current_xp = progress.current_xp.saturating_add(amount);
        progress.total_xp = progress.total_xp.saturating_add(amount);

        // Only the immediately next level is considered; a large award that
        // covers several thresholds still moves one step per call.
        if let Some(next) = self.catalog.levels().get(progress.current_level.saturating_add(1)) {
            if next.xp_required <= progress.current_xp {
                progress.current_level = next.level;
                report.leveled_up = true;
                report.new_level = Some(next.clone());
                tracing::info!(
                    user = %progress.user_id,
                    level = next.level,
                    name = %next.name,
                    "Level up"
                );
            }
        }

        for rule in self.catalog.rules().for_source(source) {
            let value = if already_counted == Some(rule.counter) {
                rule.counter.value(progress)
            } else {
                rule.counter.increment(progress)
            };

            for unlock in &rule.unlocks {
                if !unlock.when.matches(value) || progress.has_achievement(&unlock.achievement) {
                    continue;
                }
                let Some(achievement) = self.catalog.achievements().get(&unlock.achievement) else {
                    continue;
                };
                progress.achievements.push(achievement.clone());
                report.achievements_unlocked.push(achievement.clone());
                tracing::info!(
                    user = %progress.user_id,
                    achievement = %achievement.id,
                    "Achievement unlocked"
                );
            }
        }

        tracing::debug!(
            user = %progress.user_id,
            amount,
            source = %source,
            xp = progress.current_xp,
            level = progress.current_level,
            "Applied XP award"
        );

        report
    }

    // ========================================
    // LEVEL VIEWS
    // ========================================

    /// Level matching the record, or the lowest level if the record is corrupt
    pub fn current_level<'a>(&'a self, progress: &UserProgress) -> &'a Level {
        let levels = self.catalog.levels();
        levels
            .get(progress.current_level)
            .unwrap_or_else(|| levels.first())
    }

    /// Next level, or `None` at the top of the table
    pub fn next_level<'a>(&'a self, progress: &UserProgress) -> Option<&'a Level> {
        self.catalog.levels().get(progress.current_level.saturating_add(1))
    }

    pub fn progress_to_next_level(&self, progress: &UserProgress) -> ProgressToNext {
        let Some(next) = self.next_level(progress) else {
            return ProgressToNext {
                current: progress.current_xp,
                required: 0,
                percentage: 100.0,
            };
        };

        let current_level = self.current_level(progress);
        let current = progress.current_xp.saturating_sub(current_level.xp_required);
        let required = next.xp_required.saturating_sub(current_level.xp_required);
        let percentage = if required == 0 {
            100.0
        } else {
            (current as f64 / required as f64 * 100.0).min(100.0)
        };

        ProgressToNext {
            current,
            required,
            percentage,
        }
    }

    /// Features of the current level only
    pub fn unlocked_features<'a>(&'a self, progress: &UserProgress) -> &'a [String] {
        &self.current_level(progress).unlock_features
    }

    // ========================================
    // ACHIEVEMENTS & STATS
    // ========================================

    /// Catalog achievements the user has not unlocked yet
    pub fn available_achievements<'a>(&'a self, progress: &UserProgress) -> Vec<&'a Achievement> {
        self.catalog
            .achievements()
            .iter()
            .filter(|a| !progress.has_achievement(&a.id))
            .collect()
    }

    /// Overwrite the stats fields present in `update`
    pub fn update_stats(&self, progress: &mut UserProgress, update: &StatsUpdate) {
        update.apply_to(&mut progress.stats);
    }

    // ========================================
    // STREAKS
    // ========================================

    pub fn daily_bonus(&self, progress: &UserProgress) -> u64 {
        daily_bonus(progress.streaks.daily)
    }

    pub fn reset_daily_streak(&self, progress: &mut UserProgress) {
        progress.streaks.daily = 0;
    }

    /// Extend the daily streak and award the bonus for the new streak length
    pub fn add_daily_streak(&self, progress: &mut UserProgress) -> AwardReport {
        progress.streaks.daily = progress.streaks.daily.saturating_add(1);
        let bonus = self.daily_bonus(progress);
        let already_counted = if self.options.legacy_streak_double_count {
            None
        } else {
            Some(Counter::DailyStreak)
        };
        self.apply(progress, bonus, &EventSource::DailyStreak, already_counted)
    }
}

/// A single user's record bundled with the engine that mutates it.
///
/// Convenience for callers that process one user's events in sequence; the
/// record can be taken back out with [`user_progress`](Self::user_progress)
/// for persistence.
#[derive(Debug, Clone)]
pub struct ProgressSession {
    engine: ProgressionEngine,
    progress: UserProgress,
}

impl ProgressSession {
    /// Start a session for a user with no stored progress
    pub fn new(engine: ProgressionEngine, user_id: impl Into<String>) -> Self {
        let progress = engine.new_progress(user_id);
        Self { engine, progress }
    }

    /// Resume from a stored record
    pub fn resume(engine: ProgressionEngine, progress: UserProgress) -> Self {
        Self { engine, progress }
    }

    pub fn apply_award(&mut self, amount: u64, source: &EventSource) -> AwardReport {
        self.engine.apply_award(&mut self.progress, amount, source)
    }

    pub fn current_level(&self) -> &Level {
        self.engine.current_level(&self.progress)
    }

    pub fn next_level(&self) -> Option<&Level> {
        self.engine.next_level(&self.progress)
    }

    pub fn progress_to_next_level(&self) -> ProgressToNext {
        self.engine.progress_to_next_level(&self.progress)
    }

    pub fn update_stats(&mut self, update: &StatsUpdate) {
        self.engine.update_stats(&mut self.progress, update);
    }

    pub fn unlocked_features(&self) -> &[String] {
        self.engine.unlocked_features(&self.progress)
    }

    pub fn available_achievements(&self) -> Vec<&Achievement> {
        self.engine.available_achievements(&self.progress)
    }

    pub fn daily_bonus(&self) -> u64 {
        self.engine.daily_bonus(&self.progress)
    }

    pub fn reset_daily_streak(&mut self) {
        self.engine.reset_daily_streak(&mut self.progress);
    }

    pub fn add_daily_streak(&mut self) -> AwardReport {
        self.engine.add_daily_streak(&mut self.progress)
    }

    /// Copy of the current record
    pub fn user_progress(&self) -> UserProgress {
        self.progress.clone()
    }

    pub fn into_progress(self) -> UserProgress {
        self.progress
    }
}
