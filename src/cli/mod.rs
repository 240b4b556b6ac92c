//! CLI command implementations

pub mod award;
pub mod init;
pub mod score;
pub mod stats;
pub mod status;
pub mod streak;

use anyhow::Result;
use serde::Serialize;

use creatorxp::config::Config;
use creatorxp::store::ProgressStore;
use creatorxp::{AwardReport, ProgressService};

/// Build the service described by the config
pub fn open_service(config: &Config) -> Result<ProgressService<Box<dyn ProgressStore>>> {
    let engine = config.engine()?;
    let store = config.open_store(engine.shared_catalog())?;
    Ok(ProgressService::new(engine, store))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the outcome of an award
pub fn print_report(report: &AwardReport) {
    if let Some(level) = &report.new_level {
        println!(
            "  {} Level up! Now level {} - {}",
            level.badge, level.level, level.name
        );
    }
    for achievement in &report.achievements_unlocked {
        println!(
            "  {} Achievement unlocked: {} ({}) - {}",
            achievement.icon,
            achievement.name,
            achievement.rarity.as_str(),
            achievement.description
        );
    }
}
