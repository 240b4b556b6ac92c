//! XP scoring for domain events
//!
//! Pure functions turning an event's numbers into an XP award. Inputs are not
//! clamped: scores above 100 produce proportionally larger awards, so callers
//! that need the nominal ranges must validate before scoring.

use serde::{Deserialize, Serialize};

/// Base XP for a content plan
pub const CONTENT_PLAN_BASE_XP: u64 = 25;

/// Base XP for a generated post, before the platform multiplier
pub const POST_BASE_XP: u64 = 10;

/// Cap on XP from trend usage
pub const TREND_XP_CAP: u64 = 50;

/// XP per trend used
pub const TREND_XP_PER_TREND: u64 = 2;

/// Publishing platform, used for the post multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    TikTok,
    Instagram,
    YouTube,
    Twitter,
    LinkedIn,
    /// Unrecognized platform name
    Other,
}

impl Platform {
    /// Match a platform by name, ignoring case
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tiktok" => Self::TikTok,
            "instagram" => Self::Instagram,
            "youtube" => Self::YouTube,
            "twitter" => Self::Twitter,
            "linkedin" => Self::LinkedIn,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TikTok => "TikTok",
            Self::Instagram => "Instagram",
            Self::YouTube => "YouTube",
            Self::Twitter => "Twitter",
            Self::LinkedIn => "LinkedIn",
            Self::Other => "Other",
        }
    }

    /// XP multiplier in tenths (15 = 1.5x)
    pub fn multiplier_tenths(&self) -> u64 {
        match self {
            Self::TikTok => 15,
            Self::Instagram => 12,
            Self::YouTube => 13,
            Self::Twitter => 10,
            Self::LinkedIn => 11,
            Self::Other => 10,
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier_tenths() as f64 / 10.0
    }
}

/// XP for creating a content plan: `25 + viral/10 + engagement/10`
pub fn content_plan_xp(viral_score: u32, engagement: u32) -> u64 {
    CONTENT_PLAN_BASE_XP + u64::from(viral_score / 10) + u64::from(engagement / 10)
}

/// XP for a generated post: `floor((10 + viral/20) * multiplier(platform))`
pub fn post_xp(platform: Platform, viral_score: u32) -> u64 {
    let base = POST_BASE_XP + u64::from(viral_score / 20);
    base * platform.multiplier_tenths() / 10
}

/// XP for trend usage: two per trend, capped at 50
pub fn trend_xp(trends_used: u32) -> u64 {
    u64::from(trends_used)
        .saturating_mul(TREND_XP_PER_TREND)
        .min(TREND_XP_CAP)
}
