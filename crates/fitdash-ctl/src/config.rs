use anyhow::{Context, Result};
use fitdash_common::DashboardConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default configuration file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("fitdash")
        .join("dashboard.toml")
}

/// Load configuration from a specific path. A missing file yields the
/// defaults without touching the filesystem; `config init` writes them.
pub fn load_from_path(config_path: &Path) -> Result<DashboardConfig> {
    debug!("Loading dashboard configuration from {:?}", config_path);

    if !config_path.exists() {
        debug!("Configuration file not found at {:?}, using defaults", config_path);
        return Ok(DashboardConfig::default());
    }

    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

    let config: DashboardConfig = toml::from_str(&config_content)
        .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

    config
        .validate()
        .with_context(|| format!("Invalid configuration in {:?}", config_path))?;

    info!("Loaded dashboard configuration from {:?}", config_path);
    Ok(config)
}

/// Save configuration to a specific path
pub fn save_to_path(config: &DashboardConfig, config_path: &Path) -> Result<()> {
    debug!("Saving dashboard configuration to {:?}", config_path);

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let config_content = toml::to_string_pretty(config)
        .with_context(|| "Failed to serialize configuration to TOML")?;

    fs::write(config_path, config_content)
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    info!("Saved dashboard configuration to {:?}", config_path);
    Ok(())
}
