//! Configuration validation

use super::loader::{Config, ConfigError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, returning the first problem found
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Pacing above a second turns a scan of a busy process into minutes
        if config.scan.pacing_ms > 1000 {
            return Err(ConfigError::Invalid(format!(
                "scan.pacing_ms must be <= 1000, got {}",
                config.scan.pacing_ms
            )));
        }

        if config.scan.initial_table_kib == 0 {
            return Err(ConfigError::Invalid(
                "scan.initial_table_kib must be at least 1".to_string(),
            ));
        }

        match config.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "logging.level must be a tracing level, got {:?}",
                    other
                )));
            }
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_excessive_pacing_rejected() {
        let mut config = Config::default();
        config.scan.pacing_ms = 5000;
        let result = validate_config(&config);
        assert!(matches!(result.unwrap_err(), ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_table_size_rejected() {
        let mut config = Config::default();
        config.scan.initial_table_kib = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("loud"));
    }

    #[test]
    fn test_all_log_levels_accepted() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let mut config = Config::default();
            config.logging.level = level.to_string();
            assert!(validate_config(&config).is_ok());
        }
    }
}
