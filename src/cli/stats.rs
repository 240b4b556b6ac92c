//! Stats command implementation

use anyhow::{Result, bail};

use creatorxp::StatsUpdate;
use creatorxp::config::Config;

use super::{open_service, print_json};

/// Overwrite the given stats fields for a user
pub fn stats_command(config: &Config, user: &str, update: &StatsUpdate, json: bool) -> Result<()> {
    if update.is_empty() {
        bail!(
            "Nothing to update. Pass at least one of \
             --plans, --posts, --viral, --engagement, --followers"
        );
    }

    let service = open_service(config)?;
    let stats = service.update_stats(user, update)?;

    if json {
        return print_json(&stats);
    }

    println!("Stats for {}:", user);
    println!("  Content plans:   {}", stats.content_plans_created);
    println!("  Posts generated: {}", stats.posts_generated);
    println!("  Viral posts:     {}", stats.viral_posts);
    println!("  Engagement rate: {:.2}%", stats.engagement_rate);
    println!("  Followers:       {}", stats.followers_gained);
    Ok(())
}
