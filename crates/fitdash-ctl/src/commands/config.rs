use std::path::Path;

use anyhow::{Context, Result};
use fitdash_common::DashboardConfig;

use crate::config::save_to_path;

pub fn show(config: &DashboardConfig) -> Result<()> {
    let text = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    print!("{}", text);
    Ok(())
}

pub fn init(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("Configuration already exists at {}", config_path.display());
        return Ok(());
    }
    save_to_path(&DashboardConfig::default(), config_path)?;
    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}

pub fn path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}
