//! Status command implementation

use anyhow::Result;
use serde::Serialize;

use creatorxp::config::Config;
use creatorxp::{Achievement, Level, ProgressToNext, UserProgress};

use super::{open_service, print_json};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView<'a> {
    progress: &'a UserProgress,
    level: &'a Level,
    next_level: Option<&'a Level>,
    progress_to_next: ProgressToNext,
    unlocked_features: &'a [String],
    available_achievements: Vec<&'a Achievement>,
    daily_bonus: u64,
}

/// Show level, progress, streaks, and achievements for a user
pub fn status_command(config: &Config, user: &str, json: bool) -> Result<()> {
    let service = open_service(config)?;
    let engine = service.engine();
    let progress = service.snapshot(user)?;

    let view = StatusView {
        progress: &progress,
        level: engine.current_level(&progress),
        next_level: engine.next_level(&progress),
        progress_to_next: engine.progress_to_next_level(&progress),
        unlocked_features: engine.unlocked_features(&progress),
        available_achievements: engine.available_achievements(&progress),
        daily_bonus: engine.daily_bonus(&progress),
    };

    if json {
        return print_json(&view);
    }

    println!(
        "{} {} - level {} {}",
        view.level.badge,
        user,
        view.level.level,
        view.level.name
    );
    match view.next_level {
        Some(next) => println!(
            "  XP: {} ({}/{} to {}, {:.0}%)",
            progress.current_xp(),
            view.progress_to_next.current,
            view.progress_to_next.required,
            next.name,
            view.progress_to_next.percentage
        ),
        None => println!("  XP: {} (max level)", progress.current_xp()),
    }
    println!(
        "  Streaks: {} daily / {} weekly / {} monthly (bonus {} XP)",
        progress.streaks().daily,
        progress.streaks().weekly,
        progress.streaks().monthly,
        view.daily_bonus
    );

    if !view.unlocked_features.is_empty() {
        println!("  Features: {}", view.unlocked_features.join(", "));
    }

    println!(
        "\nAchievements ({}/{}):",
        progress.achievements().len(),
        engine.catalog().achievements().len()
    );
    for achievement in progress.achievements() {
        println!("  {} {} - {}", achievement.icon, achievement.name, achievement.description);
    }
    for achievement in &view.available_achievements {
        println!(
            "  🔒 {} [{}] - {}",
            achievement.name,
            achievement.rarity.as_str(),
            achievement.description
        );
    }

    Ok(())
}
