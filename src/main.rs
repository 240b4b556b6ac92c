use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use creatorxp::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "creatorxp")]
#[command(about = "Creator progression engine - XP, levels, streaks and achievements")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.creatorxp/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Award XP to a user for an event
    Award {
        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        amount: u64,

        /// Event tag (content_plan_created, viral_post, daily_streak, ...)
        #[arg(short, long)]
        source: String,
    },

    /// Compute the XP for an event, optionally awarding it
    Score {
        #[command(subcommand)]
        event: ScoreEvent,

        /// Award the computed XP to this user
        #[arg(short, long, global = true)]
        user: Option<String>,
    },

    /// Extend or reset a user's daily streak
    Streak {
        #[arg(short, long)]
        user: String,

        /// Reset the daily streak to zero instead of extending it
        #[arg(long)]
        reset: bool,
    },

    /// Overwrite stats fields for a user
    Stats {
        #[arg(short, long)]
        user: String,

        #[arg(long)]
        plans: Option<u64>,

        #[arg(long)]
        posts: Option<u64>,

        #[arg(long)]
        viral: Option<u64>,

        #[arg(long)]
        engagement: Option<f64>,

        #[arg(long)]
        followers: Option<u64>,
    },

    /// Show a user's level, progress, and achievements
    Status {
        #[arg(short, long)]
        user: String,
    },

    /// Write a config file with the built-in tables
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ScoreEvent {
    /// Content plan: 25 + viral/10 + engagement/10
    Plan {
        #[arg(long)]
        viral: u32,

        #[arg(long)]
        engagement: u32,
    },

    /// Generated post: (10 + viral/20) x platform multiplier
    Post {
        #[arg(long)]
        platform: String,

        #[arg(long)]
        viral: u32,
    },

    /// Trend usage: 2 per trend, capped at 50
    Trends {
        #[arg(long)]
        count: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config;
    let load_config = || Config::load(config_path.as_deref());
    let json = cli.json;

    match cli.command {
        Commands::Award {
            user,
            amount,
            source,
        } => {
            cli::award::award_command(&load_config()?, &user, amount, &source, json)?;
        }
        Commands::Score { event, user } => {
            let event = match event {
                ScoreEvent::Plan { viral, engagement } => {
                    cli::score::ScoredEvent::ContentPlan { viral, engagement }
                }
                ScoreEvent::Post { platform, viral } => {
                    cli::score::ScoredEvent::Post { platform, viral }
                }
                ScoreEvent::Trends { count } => cli::score::ScoredEvent::Trends { count },
            };
            cli::score::score_command(&load_config()?, event, user.as_deref(), json)?;
        }
        Commands::Streak { user, reset } => {
            cli::streak::streak_command(&load_config()?, &user, reset, json)?;
        }
        Commands::Stats {
            user,
            plans,
            posts,
            viral,
            engagement,
            followers,
        } => {
            let update = creatorxp::StatsUpdate {
                content_plans_created: plans,
                posts_generated: posts,
                viral_posts: viral,
                engagement_rate: engagement,
                followers_gained: followers,
            };
            cli::stats::stats_command(&load_config()?, &user, &update, json)?;
        }
        Commands::Status { user } => {
            cli::status::status_command(&load_config()?, &user, json)?;
        }
        Commands::Init { force } => {
            cli::init::init_command(config_path.as_deref(), force)?;
        }
    }

    Ok(())
}
