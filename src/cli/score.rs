//! Score command implementation

use anyhow::Result;
use serde::Serialize;

use creatorxp::config::Config;
use creatorxp::{EventSource, Platform, content_plan_xp, post_xp, trend_xp};

use super::{open_service, print_json, print_report};

/// Event to score, with its inputs
pub enum ScoredEvent {
    ContentPlan { viral: u32, engagement: u32 },
    Post { platform: String, viral: u32 },
    Trends { count: u32 },
}

impl ScoredEvent {
    fn xp(&self) -> u64 {
        match self {
            Self::ContentPlan { viral, engagement } => content_plan_xp(*viral, *engagement),
            Self::Post { platform, viral } => post_xp(Platform::from_name(platform), *viral),
            Self::Trends { count } => trend_xp(*count),
        }
    }

    /// Human-readable event name
    fn describe(&self) -> String {
        match self {
            Self::ContentPlan { .. } => "content plan".to_string(),
            Self::Post { platform, .. } => {
                format!("{} post", Platform::from_name(platform).label())
            }
            Self::Trends { count } => format!("{count} trends"),
        }
    }

    /// Tag used when the score is awarded
    fn source(&self) -> EventSource {
        match self {
            Self::ContentPlan { .. } => EventSource::ContentPlanCreated,
            Self::Post { .. } => EventSource::Other("post_generated".to_string()),
            Self::Trends { .. } => EventSource::Other("trends_used".to_string()),
        }
    }
}

#[derive(Serialize)]
struct ScoreOutput<'a> {
    xp: u64,
    source: EventSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a creatorxp::AwardReport>,
}

/// Compute the XP for an event and award it when a user is given
pub fn score_command(
    config: &Config,
    event: ScoredEvent,
    user: Option<&str>,
    json: bool,
) -> Result<()> {
    if let ScoredEvent::ContentPlan { viral, engagement } = &event {
        if *viral > 100 || *engagement > 100 {
            tracing::warn!("Scores above 100 give awards beyond the nominal 25-45 XP range");
        }
    }

    let xp = event.xp();
    let source = event.source();
    let description = event.describe();

    let report = match user {
        Some(user) => Some(open_service(config)?.award(user, xp, &source)?),
        None => None,
    };

    if json {
        return print_json(&ScoreOutput {
            xp,
            source,
            report: report.as_ref(),
        });
    }

    match user {
        Some(user) => println!("{} XP for {} awarded to {}", xp, description, user),
        None => println!("{} XP for {}", xp, description),
    }
    if let Some(report) = &report {
        print_report(report);
    }
    Ok(())
}
