//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::LoggingConfig;
use crate::config::validation::validate_config;
use crate::error::ConfigError;

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoggingConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = LoggingConfig::from_toml_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
