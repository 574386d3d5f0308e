//! Configuration module for handlescope
//!
//! Provides configuration loading, validation, and default settings.

mod defaults;
mod loader;
mod validator;

pub use defaults::default_config;
pub use loader::{load_config, Config, ConfigError, ConfigLoader, LoggingConfig, ScanConfig};
pub use validator::{validate_config, ConfigValidator};

// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
