//! Per-user progress record and derived views
//!
//! Field names serialize to the camelCase names used by stored records
//! (`userId`, `currentXP`, `totalXP`, ...).

use serde::{Deserialize, Serialize};

use super::definitions::Achievement;
use super::streaks::Streaks;

/// Creator activity counters and metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub content_plans_created: u64,
    pub posts_generated: u64,
    pub viral_posts: u64,
    pub engagement_rate: f64,
    pub followers_gained: u64,
}

/// Partial stats update; `Some` fields overwrite, `None` fields are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsUpdate {
    pub content_plans_created: Option<u64>,
    pub posts_generated: Option<u64>,
    pub viral_posts: Option<u64>,
    pub engagement_rate: Option<f64>,
    pub followers_gained: Option<u64>,
}

impl StatsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply_to(&self, stats: &mut UserStats) {
        if let Some(v) = self.content_plans_created {
            stats.content_plans_created = v;
        }
        if let Some(v) = self.posts_generated {
            stats.posts_generated = v;
        }
        if let Some(v) = self.viral_posts {
            stats.viral_posts = v;
        }
        if let Some(v) = self.engagement_rate {
            stats.engagement_rate = v;
        }
        if let Some(v) = self.followers_gained {
            stats.followers_gained = v;
        }
    }
}

/// One user's progression state.
///
/// Mutated only through [`ProgressionEngine`](super::ProgressionEngine), which
/// keeps `current_xp == total_xp`, moves `current_level` only after an XP
/// change, and never unlocks the same achievement twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub(crate) user_id: String,
    pub(crate) current_level: u32,
    #[serde(rename = "currentXP")]
    pub(crate) current_xp: u64,
    #[serde(rename = "totalXP")]
    pub(crate) total_xp: u64,
    #[serde(default)]
    pub(crate) achievements: Vec<Achievement>,
    #[serde(default)]
    pub(crate) streaks: Streaks,
    #[serde(default)]
    pub(crate) stats: UserStats,
}

impl UserProgress {
    /// Fresh record for a newly observed user: level 1, all counters zero
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            current_level: 1,
            current_xp: 0,
            total_xp: 0,
            achievements: Vec::new(),
            streaks: Streaks::default(),
            stats: UserStats::default(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn current_xp(&self) -> u64 {
        self.current_xp
    }

    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    /// Unlocked achievements in unlock order
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    pub fn streaks(&self) -> &Streaks {
        &self.streaks
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }
}

/// Progress inside the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressToNext {
    /// XP earned since entering the current level (total XP at max level)
    pub current: u64,
    /// XP span of the current level (0 at max level)
    pub required: u64,
    /// 0.0 - 100.0
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_starts_at_level_one() {
        let progress = UserProgress::new("creator-1");
        assert_eq!(progress.user_id(), "creator-1");
        assert_eq!(progress.current_level(), 1);
        assert_eq!(progress.current_xp(), 0);
        assert_eq!(progress.total_xp(), 0);
        assert!(progress.achievements().is_empty());
        assert_eq!(progress.stats(), &UserStats::default());
    }

    #[test]
    fn test_stats_update_overwrites_only_given_fields() {
        let mut stats = UserStats {
            content_plans_created: 4,
            posts_generated: 9,
            viral_posts: 1,
            engagement_rate: 3.5,
            followers_gained: 120,
        };
        let update = StatsUpdate {
            posts_generated: Some(2),
            engagement_rate: Some(7.25),
            ..Default::default()
        };
        update.apply_to(&mut stats);

        assert_eq!(stats.content_plans_created, 4);
        assert_eq!(stats.posts_generated, 2);
        assert_eq!(stats.engagement_rate, 7.25);
        assert_eq!(stats.followers_gained, 120);
        assert!(!update.is_empty());
        assert!(StatsUpdate::default().is_empty());
    }

    #[test]
    fn test_progress_uses_stored_field_names() {
        let progress = UserProgress::new("u-9");
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["userId"], "u-9");
        assert_eq!(json["currentLevel"], 1);
        assert_eq!(json["currentXP"], 0);
        assert_eq!(json["totalXP"], 0);
        assert_eq!(json["stats"]["contentPlansCreated"], 0);
        assert_eq!(json["streaks"]["daily"], 0);
    }

    #[test]
    fn test_progress_loads_record_without_optional_sections() {
        let progress: UserProgress = serde_json::from_str(
            r#"{"userId":"legacy","currentLevel":2,"currentXP":150,"totalXP":150}"#,
        )
        .unwrap();
        assert_eq!(progress.current_level(), 2);
        assert_eq!(progress.current_xp(), 150);
        assert_eq!(progress.streaks(), &Streaks::default());
    }
}
