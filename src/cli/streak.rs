//! Streak command implementation

use anyhow::Result;

use creatorxp::config::Config;
use creatorxp::daily_bonus;

use super::{open_service, print_json, print_report};

/// Extend the user's daily streak, or reset it with `reset`
pub fn streak_command(config: &Config, user: &str, reset: bool, json: bool) -> Result<()> {
    let service = open_service(config)?;

    if reset {
        service.reset_daily_streak(user)?;
        let progress = service.snapshot(user)?;
        if json {
            return print_json(progress.streaks());
        }
        println!("Daily streak for {} reset", user);
        return Ok(());
    }

    let report = service.add_daily_streak(user)?;
    if json {
        return print_json(&report);
    }

    let progress = service.snapshot(user)?;
    let daily = progress.streaks().daily;
    println!(
        "🔥 {} day streak for {} (+{} XP today, {} XP tomorrow)",
        daily,
        user,
        service.engine().daily_bonus(&progress),
        daily_bonus(daily.saturating_add(1))
    );
    print_report(&report);
    Ok(())
}
