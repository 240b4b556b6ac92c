//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;

use creatorxp::config::Config;

/// Write a config file with every built-in table spelled out
pub fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    Config::with_defaults().save_to_file(&config_path)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
