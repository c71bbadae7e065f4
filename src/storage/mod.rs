pub mod config;
pub mod restaurant_file;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use config::{Config, ConfigStorage, GeneralConfig, TomlConfigStorage};
pub use restaurant_file::{RestaurantFile, RestaurantStore, StoreError};

/// Ensure XDG data and config directories exist
/// Returns (data_dir, config_dir)
///
/// XDG Base Directory Specification:
/// - Data: $XDG_DATA_HOME/food_finder (default: ~/.local/share/food_finder)
/// - Config: $XDG_CONFIG_HOME/food_finder (default: ~/.config/food_finder)
pub fn ensure_directories() -> Result<(PathBuf, PathBuf)> {
    let home = env::var("HOME").context("HOME environment variable not set")?;
    let home_path = PathBuf::from(home);

    // Get XDG data directory
    let data_dir = match env::var("XDG_DATA_HOME") {
        Ok(xdg_data) => PathBuf::from(xdg_data).join("food_finder"),
        Err(_) => home_path.join(".local/share/food_finder"),
    };

    // Get XDG config directory
    let config_dir = match env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config) => PathBuf::from(xdg_config).join("food_finder"),
        Err(_) => home_path.join(".config/food_finder"),
    };

    // Create data directory
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    // Create config directory
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

    log::debug!("Data directory: {:?}", data_dir);
    log::debug!("Config directory: {:?}", config_dir);

    Ok((data_dir, config_dir))
}

/// Restaurant file named by the config, or the default one in the data directory
pub fn data_file_path(config: &Config, data_dir: &Path) -> PathBuf {
    config
        .general
        .data_file
        .clone()
        .unwrap_or_else(|| data_dir.join("restaurants.txt"))
}
