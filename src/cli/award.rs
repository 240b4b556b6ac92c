//! Award command implementation

use anyhow::Result;
use serde::Serialize;

use creatorxp::config::Config;
use creatorxp::{AwardReport, EventSource};

use super::{open_service, print_json, print_report};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AwardOutput<'a> {
    user_id: &'a str,
    amount: u64,
    source: &'a EventSource,
    #[serde(rename = "currentXP")]
    current_xp: u64,
    current_level: u32,
    report: &'a AwardReport,
}

/// Award `amount` XP to `user` for the event tagged `source`
pub fn award_command(
    config: &Config,
    user: &str,
    amount: u64,
    source: &str,
    json: bool,
) -> Result<()> {
    let service = open_service(config)?;
    let source = EventSource::parse(source);
    let report = service.award(user, amount, &source)?;
    let progress = service.snapshot(user)?;

    if json {
        return print_json(&AwardOutput {
            user_id: user,
            amount,
            source: &source,
            current_xp: progress.current_xp(),
            current_level: progress.current_level(),
            report: &report,
        });
    }

    println!(
        "+{} XP for {} ({}) - total {} XP, level {}",
        amount,
        user,
        source,
        progress.current_xp(),
        progress.current_level()
    );
    print_report(&report);
    Ok(())
}
