//! Default configuration values for handlescope

use super::loader::{Config, LoggingConfig, ScanConfig};

/// Default pause between handle resolutions, in milliseconds
pub const DEFAULT_PACING_MS: u64 = 5;
/// Default initial handle table buffer, in KiB
pub const DEFAULT_INITIAL_TABLE_KIB: usize = 4;
/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default log file ("" means stderr only)
pub const DEFAULT_LOG_FILE: &str = "";

/// Returns the built-in default configuration
pub fn default_config() -> Config {
    Config {
        scan: ScanConfig {
            pacing_ms: DEFAULT_PACING_MS,
            initial_table_kib: DEFAULT_INITIAL_TABLE_KIB,
        },
        logging: LoggingConfig {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: DEFAULT_LOG_FILE.to_string(),
        },
    }
}
