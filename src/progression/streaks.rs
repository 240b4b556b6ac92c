//! Streak tracking
//!
//! Daily/weekly/monthly activity counters and the daily bonus formula.

use serde::{Deserialize, Serialize};

/// XP granted per day of daily streak
pub const DAILY_BONUS_PER_DAY: u64 = 5;

/// Upper bound on the daily streak bonus
pub const DAILY_BONUS_CAP: u64 = 50;

/// Streak counters stored on a user's progress record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    #[serde(default)]
    pub daily: u32,
    #[serde(default)]
    pub weekly: u32,
    #[serde(default)]
    pub monthly: u32,
}

/// Bonus XP for a daily streak of `daily` days, capped at [`DAILY_BONUS_CAP`]
pub fn daily_bonus(daily: u32) -> u64 {
    (u64::from(daily) * DAILY_BONUS_PER_DAY).min(DAILY_BONUS_CAP)
}
