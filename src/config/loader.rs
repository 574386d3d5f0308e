//! Configuration loader for handlescope
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::{self, default_config};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_scan")]
    pub scan: ScanConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    #[serde(default = "default_initial_table_kib")]
    pub initial_table_kib: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration or returns defaults if file doesn't exist
    pub fn load_or_default(&self) -> Config {
        self.load().unwrap_or_else(|_| Config::default())
    }

    /// Saves configuration to file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Loads configuration from the default location
pub fn load_config() -> Result<Config, ConfigError> {
    let loader = ConfigLoader::new("handlescope.toml");
    Ok(loader.load_or_default())
}

// Section defaults for serde
fn default_scan() -> ScanConfig {
    default_config().scan
}

fn default_logging() -> LoggingConfig {
    default_config().logging
}

// Individual field defaults
fn default_pacing_ms() -> u64 {
    defaults::DEFAULT_PACING_MS
}

fn default_initial_table_kib() -> usize {
    defaults::DEFAULT_INITIAL_TABLE_KIB
}

fn default_log_level() -> String {
    defaults::DEFAULT_LOG_LEVEL.to_string()
}

fn default_log_file() -> String {
    defaults::DEFAULT_LOG_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.pacing_ms, 5);
        assert_eq!(config.scan.initial_table_kib, 4);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let loader = ConfigLoader::new("nonexistent.toml");
        let result = loader.load();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_or_default() {
        let loader = ConfigLoader::new("nonexistent.toml");
        let config = loader.load_or_default();
        assert_eq!(config.scan.pacing_ms, 5);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let config = Config::default();
        let loader = ConfigLoader::new(&config_path);

        loader.save(&config).unwrap();
        assert!(config_path.exists());

        let loaded = loader.load().unwrap();
        assert_eq!(loaded.scan.pacing_ms, config.scan.pacing_ms);
        assert_eq!(loaded.logging.level, config.logging.level);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
            [scan]
            pacing_ms = 0
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.scan.pacing_ms, 0);
        // Check defaults are applied
        assert_eq!(config.scan.initial_table_kib, 4);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("scan = not toml");
        assert!(result.is_err());
    }
}
