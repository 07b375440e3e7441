//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the filter directive parses
//! - Validate value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggingConfig → Result<(), Vec<String>>

use tracing_subscriber::EnvFilter;

use crate::config::schema::LoggingConfig;
use crate::logger::Level;

/// Lowest and highest accepted `default_level`.
const LEVEL_RANGE: (Level, Level) = (Level(Level::DEBUG.0 - 4), Level(Level::ERROR.0 + 4));

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &LoggingConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.filter.trim().is_empty() {
        errors.push("filter must not be empty".to_string());
    } else if let Err(e) = EnvFilter::try_new(&config.filter) {
        errors.push(format!("filter {:?} is invalid: {}", config.filter, e));
    }

    let (min, max) = LEVEL_RANGE;
    if config.default_level < min || config.default_level > max {
        errors.push(format!(
            "default_level {} is outside {}..={}",
            config.default_level, min, max
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
