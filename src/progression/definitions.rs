//! Achievement definitions and metadata
//!
//! Unlock conditions are not part of an achievement; they live in the rule
//! set (see `rules.rs`) and reference achievements by id.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::catalog::CatalogError;

/// Achievement rarity, used only for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Self::Common),
            "rare" => Some(Self::Rare),
            "epic" => Some(Self::Epic),
            "legendary" => Some(Self::Legendary),
            _ => None,
        }
    }

    /// Display colour (hex) for badges and toasts
    pub fn color(&self) -> &'static str {
        match self {
            Self::Common => "#9ca3af",
            Self::Rare => "#3b82f6",
            Self::Epic => "#a855f7",
            Self::Legendary => "#f59e0b",
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Defined for display; unlocking does not grant it
    pub xp_reward: u32,
    pub rarity: Rarity,
}

impl Achievement {
    fn builtin(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        xp_reward: u32,
        rarity: Rarity,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            xp_reward,
            rarity,
        }
    }
}

/// Set of achievements with unique ids, in definition order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementCatalog {
    achievements: Vec<Achievement>,
}

impl AchievementCatalog {
    pub fn new(achievements: Vec<Achievement>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for achievement in &achievements {
            if achievement.id.trim().is_empty() {
                return Err(CatalogError::EmptyAchievementId);
            }
            if !seen.insert(achievement.id.as_str()) {
                return Err(CatalogError::DuplicateAchievement(achievement.id.clone()));
            }
        }
        Ok(Self { achievements })
    }

    /// The built-in achievement table
    pub fn builtin() -> Self {
        Self {
            achievements: builtin_achievements(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter()
    }

    pub fn len(&self) -> usize {
        self.achievements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
    }

    /// Total XP of every reward in the catalog
    pub fn total_xp(&self) -> u64 {
        self.achievements.iter().map(|a| u64::from(a.xp_reward)).sum()
    }

    pub fn into_inner(self) -> Vec<Achievement> {
        self.achievements
    }
}

fn builtin_achievements() -> Vec<Achievement> {
    vec![
        Achievement::builtin(
            "first_plan",
            "First Steps",
            "Create your first content plan",
            "🎯",
            50,
            Rarity::Common,
        ),
        Achievement::builtin(
            "viral_post",
            "Gone Viral",
            "Publish a post that reaches viral status",
            "🚀",
            100,
            Rarity::Rare,
        ),
        Achievement::builtin(
            "streak_7",
            "Week Warrior",
            "Keep a 7-day creation streak",
            "🔥",
            150,
            Rarity::Epic,
        ),
        Achievement::builtin(
            "trend_master",
            "Trend Master",
            "Ride 10 trending topics",
            "📈",
            75,
            Rarity::Rare,
        ),
        Achievement::builtin(
            "engagement_guru",
            "Engagement Guru",
            "Reach a 10% engagement rate",
            "💬",
            200,
            Rarity::Epic,
        ),
        Achievement::builtin(
            "content_legend",
            "Content Legend",
            "Reach the highest creator level",
            "👑",
            500,
            Rarity::Legendary,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_achievements_are_valid() {
        let all = AchievementCatalog::builtin().into_inner();
        assert!(AchievementCatalog::new(all).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut all = AchievementCatalog::builtin().into_inner();
        all.push(all[0].clone());
        assert_eq!(
            AchievementCatalog::new(all),
            Err(CatalogError::DuplicateAchievement("first_plan".to_string()))
        );
    }

    #[test]
    fn test_rejects_blank_id() {
        let mut all = AchievementCatalog::builtin().into_inner();
        all[1].id = "  ".to_string();
        assert_eq!(
            AchievementCatalog::new(all),
            Err(CatalogError::EmptyAchievementId)
        );
    }

    #[test]
    fn test_rarity_round_trips_through_str() {
        for rarity in [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary] {
            assert_eq!(Rarity::from_str(rarity.as_str()), Some(rarity));
        }
        assert_eq!(Rarity::from_str("mythic"), None);
    }

    #[test]
    fn test_rarity_colors_are_distinct_hex() {
        let colors: Vec<_> = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary]
            .iter()
            .map(Rarity::color)
            .collect();
        for color in &colors {
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
        assert_eq!(Rarity::Legendary.color(), "#f59e0b");
        let unique: std::collections::HashSet<_> = colors.iter().collect();
        assert_eq!(unique.len(), colors.len());
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = AchievementCatalog::builtin();
        assert_eq!(catalog.get("streak_7").map(|a| a.rarity), Some(Rarity::Epic));
        assert!(!catalog.contains("nope"));
        assert_eq!(catalog.total_xp(), 1075);
    }
}
