//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::logger::Level;

/// Logging setup for a process that uses context-scoped loggers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (e.g., "info,ctxlog=debug").
    pub filter: String,

    /// Colourise formatted output.
    pub ansi: bool,

    /// Include event targets in formatted output.
    pub with_target: bool,

    /// Fall back to the ambient default logger when a context carries none.
    pub default_logger: bool,

    /// Minimum level the ambient default logger hands to `tracing`.
    pub default_level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            ansi: true,
            with_target: true,
            default_logger: true,
            default_level: Level::INFO,
        }
    }
}

impl LoggingConfig {
    /// Parse a TOML document. Does not validate.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = LoggingConfig::from_toml_str("").unwrap();
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = LoggingConfig::from_toml_str(
            r#"
            filter = "warn,ctxlog=debug"
            ansi = false
            with_target = false
            default_logger = false
            default_level = "DEBUG+1"
            "#,
        )
        .unwrap();

        assert_eq!(config.filter, "warn,ctxlog=debug");
        assert!(!config.ansi);
        assert!(!config.with_target);
        assert!(!config.default_logger);
        assert_eq!(config.default_level, Level(-3));
    }

    #[test]
    fn test_bad_level_is_rejected() {
        assert!(LoggingConfig::from_toml_str(r#"default_level = "LOUD""#).is_err());
    }
}
