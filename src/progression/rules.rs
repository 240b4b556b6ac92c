//! Achievement unlock rules
//!
//! Each rule is keyed by an event source tag. When an award arrives with that
//! tag the rule bumps one counter on the user's record and then checks its
//! unlocks, in order, against the new counter value.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::CatalogError;
use super::definitions::AchievementCatalog;
use super::models::UserProgress;

/// Tag describing which domain action produced an XP award
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventSource {
    ContentPlanCreated,
    ViralPost,
    DailyStreak,
    /// Any other tag; awards XP but matches no built-in rule
    Other(String),
}

impl EventSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ContentPlanCreated => "content_plan_created",
            Self::ViralPost => "viral_post",
            Self::DailyStreak => "daily_streak",
            Self::Other(tag) => tag,
        }
    }

    pub fn parse(tag: &str) -> Self {
        match tag {
            "content_plan_created" => Self::ContentPlanCreated,
            "viral_post" => Self::ViralPost,
            "daily_streak" => Self::DailyStreak,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for EventSource {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<&str> for EventSource {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<EventSource> for String {
    fn from(source: EventSource) -> Self {
        source.as_str().to_string()
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counter on the user's record that a rule advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    ContentPlansCreated,
    ViralPosts,
    DailyStreak,
}

impl Counter {
    pub fn value(&self, progress: &UserProgress) -> u64 {
        match self {
            Self::ContentPlansCreated => progress.stats.content_plans_created,
            Self::ViralPosts => progress.stats.viral_posts,
            Self::DailyStreak => u64::from(progress.streaks.daily),
        }
    }

    /// Add one to the counter and return the new value
    pub(crate) fn increment(&self, progress: &mut UserProgress) -> u64 {
        match self {
            Self::ContentPlansCreated => {
                progress.stats.content_plans_created += 1;
            }
            Self::ViralPosts => {
                progress.stats.viral_posts += 1;
            }
            Self::DailyStreak => {
                progress.streaks.daily = progress.streaks.daily.saturating_add(1);
            }
        }
        self.value(progress)
    }
}

/// Condition on a counter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Equals(u64),
    AtLeast(u64),
}

impl Trigger {
    pub fn matches(&self, value: u64) -> bool {
        match *self {
            Self::Equals(target) => value == target,
            Self::AtLeast(target) => value >= target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRule {
    pub achievement: String,
    pub when: Trigger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub source: EventSource,
    pub counter: Counter,
    #[serde(default)]
    pub unlocks: Vec<UnlockRule>,
}

/// Ordered list of rules, validated against an achievement catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>, achievements: &AchievementCatalog) -> Result<Self, CatalogError> {
        for rule in &rules {
            for unlock in &rule.unlocks {
                if !achievements.contains(&unlock.achievement) {
                    return Err(CatalogError::UnknownRuleAchievement {
                        source_tag: rule.source.to_string(),
                        achievement: unlock.achievement.clone(),
                    });
                }
            }
        }
        Ok(Self { rules })
    }

    /// Rules for the three tracked event sources
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Rules triggered by `source`, in definition order
    pub fn for_source<'a>(&'a self, source: &'a EventSource) -> impl Iterator<Item = &'a Rule> {
        self.rules.iter().filter(move |r| &r.source == source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn into_inner(self) -> Vec<Rule> {
        self.rules
    }
}

fn builtin_rules() -> Vec<Rule> {
    let single = |source, counter, achievement: &str, target| Rule {
        source,
        counter,
        unlocks: vec![UnlockRule {
            achievement: achievement.to_string(),
            when: Trigger::Equals(target),
        }],
    };

    vec![
        single(
            EventSource::ContentPlanCreated,
            Counter::ContentPlansCreated,
            "first_plan",
            1,
        ),
        single(EventSource::ViralPost, Counter::ViralPosts, "viral_post", 1),
        single(EventSource::DailyStreak, Counter::DailyStreak, "streak_7", 7),
    ]
}
