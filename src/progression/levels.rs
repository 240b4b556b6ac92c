//! Level catalog
//!
//! Defines level thresholds, display data, and the features each tier surfaces.

use serde::{Deserialize, Serialize};

use super::catalog::CatalogError;

/// Level definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub level: u32,
    pub name: String,
    pub badge: String,
    /// Minimum cumulative XP to enter this level
    pub xp_required: u64,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub unlock_features: Vec<String>,
}

impl Level {
    fn builtin(
        level: u32,
        name: &str,
        badge: &str,
        xp_required: u64,
        benefits: &[&str],
        unlock_features: &[&str],
    ) -> Self {
        Self {
            level,
            name: name.to_string(),
            badge: badge.to_string(),
            xp_required,
            benefits: benefits.iter().map(|s| s.to_string()).collect(),
            unlock_features: unlock_features.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered, validated table of levels.
///
/// Levels are numbered 1..=N without gaps and `xp_required` is strictly
/// increasing, with level 1 at 0 XP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Validate and build a catalog from raw level definitions
    pub fn new(levels: Vec<Level>) -> Result<Self, CatalogError> {
        let Some(first) = levels.first() else {
            return Err(CatalogError::NoLevels);
        };
        if first.level != 1 {
            return Err(CatalogError::FirstLevelNumber(first.level));
        }
        if first.xp_required != 0 {
            return Err(CatalogError::FirstLevelThreshold(first.xp_required));
        }

        for pair in levels.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.level != prev.level + 1 {
                return Err(CatalogError::LevelSequence {
                    expected: prev.level + 1,
                    found: next.level,
                });
            }
            if next.xp_required <= prev.xp_required {
                return Err(CatalogError::ThresholdNotIncreasing {
                    level: next.level,
                    xp_required: next.xp_required,
                    previous: prev.xp_required,
                });
            }
        }

        Ok(Self { levels })
    }

    /// The built-in level table
    pub fn builtin() -> Self {
        Self {
            levels: builtin_levels(),
        }
    }

    pub fn get(&self, level: u32) -> Option<&Level> {
        self.levels.iter().find(|l| l.level == level)
    }

    /// Lowest level (always level 1)
    pub fn first(&self) -> &Level {
        &self.levels[0]
    }

    /// Highest level in the table
    pub fn last(&self) -> &Level {
        &self.levels[self.levels.len() - 1]
    }

    pub fn max_level(&self) -> u32 {
        self.last().level
    }

    /// Highest level whose threshold is covered by `xp`
    pub fn for_xp(&self, xp: u64) -> &Level {
        self.levels
            .iter()
            .rev()
            .find(|l| xp >= l.xp_required)
            .unwrap_or_else(|| self.first())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn into_inner(self) -> Vec<Level> {
        self.levels
    }
}

fn builtin_levels() -> Vec<Level> {
    vec![
        Level::builtin(
            1,
            "Content Newbie",
            "🌱",
            0,
            &["Basic content planning", "3 AI generations per day"],
            &["content_planner", "basic_templates"],
        ),
        Level::builtin(
            2,
            "Rising Creator",
            "⭐",
            100,
            &["Trend insights", "10 AI generations per day"],
            &["content_planner", "basic_templates", "trend_insights"],
        ),
        Level::builtin(
            3,
            "Content Crafter",
            "🎨",
            300,
            &["Post scheduler", "Hashtag suggestions"],
            &[
                "content_planner",
                "advanced_templates",
                "trend_insights",
                "post_scheduler",
            ],
        ),
        Level::builtin(
            4,
            "Trend Hunter",
            "🔥",
            600,
            &["Real-time trend alerts", "Competitor snapshots"],
            &[
                "content_planner",
                "advanced_templates",
                "trend_alerts",
                "post_scheduler",
                "competitor_analysis",
            ],
        ),
        Level::builtin(
            5,
            "Viral Architect",
            "🚀",
            1000,
            &["Viral score predictions", "Unlimited AI generations"],
            &[
                "content_planner",
                "advanced_templates",
                "trend_alerts",
                "post_scheduler",
                "competitor_analysis",
                "viral_predictor",
            ],
        ),
        Level::builtin(
            6,
            "Influence Builder",
            "💎",
            1500,
            &["Audience analytics", "Priority generation queue"],
            &[
                "content_planner",
                "premium_templates",
                "trend_alerts",
                "post_scheduler",
                "competitor_analysis",
                "viral_predictor",
                "audience_analytics",
            ],
        ),
        Level::builtin(
            7,
            "Creator Elite",
            "👑",
            2500,
            &["Brand collaboration board", "Custom AI voice"],
            &[
                "content_planner",
                "premium_templates",
                "trend_alerts",
                "post_scheduler",
                "competitor_analysis",
                "viral_predictor",
                "audience_analytics",
                "brand_board",
            ],
        ),
        Level::builtin(
            8,
            "Content Legend",
            "🏆",
            4000,
            &["Early access to new tools", "Legend profile badge"],
            &[
                "content_planner",
                "premium_templates",
                "trend_alerts",
                "post_scheduler",
                "competitor_analysis",
                "viral_predictor",
                "audience_analytics",
                "brand_board",
                "early_access",
            ],
        ),
    ]
}
