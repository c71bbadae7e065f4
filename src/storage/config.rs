use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::SortKey;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

/// General configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Restaurant file to use (default: <data dir>/restaurants.txt)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Level for the log file (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Order used by `list` when no --sort is given
    #[serde(default)]
    pub default_sort: SortKey,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            data_file: None,
            log_file: None,
            log_level: default_log_level(),
            default_sort: SortKey::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Trait for configuration storage
pub trait ConfigStorage: Send + Sync {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Save configuration to file
    fn save(&self, config: &Config) -> Result<()>;

    /// Get the config file path
    fn path(&self) -> &PathBuf;

    /// Create default configuration file if it doesn't exist
    fn create_default(&self) -> Result<()>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        use anyhow::Context;
        use std::fs;

        // If file doesn't exist, create default and return it
        if !self.path.exists() {
            log::info!(
                "Config file not found at {:?}, creating default configuration",
                self.path
            );
            self.create_default()?;
            return Ok(Config::default());
        }

        // Read and parse TOML
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::info!("Loaded configuration from {:?}", self.path);
        log::debug!(
            "Config: data_file={:?}, default_sort={:?}",
            config.general.data_file,
            config.general.default_sort
        );

        Ok(config)
    }

    fn save(&self, config: &Config) -> Result<()> {
        use anyhow::Context;
        use std::fs;

        // Serialize to TOML
        let toml_str = toml::to_string_pretty(config)
            .with_context(|| "Failed to serialize configuration")?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        // Write to file
        fs::write(&self.path, toml_str)
            .with_context(|| format!("Failed to write config to {:?}", self.path))?;

        log::debug!("Saved configuration to {:?}", self.path);

        Ok(())
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn create_default(&self) -> Result<()> {
        use anyhow::Context;
        use std::fs;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        // Example config compiled into the binary
        let example_config = include_str!("../../food_finder.toml.example");

        fs::write(&self.path, example_config)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeneralConfig::default();
        assert_eq!(config.data_file, None);
        assert_eq!(config.log_file, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.default_sort, SortKey::Name);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
        [general]
        data_file = "/tmp/restaurants.txt"
        default_sort = "price"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.data_file,
            Some(PathBuf::from("/tmp/restaurants.txt"))
        );
        assert_eq!(config.general.default_sort, SortKey::Price);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../food_finder.toml.example")).unwrap();
        assert_eq!(config.general.default_sort, SortKey::Name);
    }

    #[test]
    fn test_load_creates_default_then_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TomlConfigStorage::new(dir.path().join("food_finder.toml"));

        let config = storage.load().unwrap();
        assert!(storage.path().exists());
        assert_eq!(config.general.default_sort, SortKey::Name);

        let mut config = config;
        config.general.default_sort = SortKey::Cuisine;
        config.general.data_file = Some(dir.path().join("mine.txt"));
        storage.save(&config).unwrap();

        let reloaded = storage.load().unwrap();
        assert_eq!(reloaded.general.default_sort, SortKey::Cuisine);
        assert_eq!(reloaded.general.data_file, Some(dir.path().join("mine.txt")));
    }
}
