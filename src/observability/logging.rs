//! Structured logging setup.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Install the ambient default logger
//! - Apply the default-logger policy
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via config and environment

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::binding::global_policy;
use crate::config::validation::validate_config;
use crate::config::LoggingConfig;
use crate::error::{ConfigError, InitError};
use crate::logger::{self, Logger, TracingHandler};

/// Install the ambient default logger and default-logger policy described by
/// `config`, without touching the subscriber.
pub fn apply_config(config: &LoggingConfig) {
    logger::set_default(Logger::new(TracingHandler::with_min_level(config.default_level)));

    if config.default_logger {
        global_policy().enable();
    } else {
        global_policy().disable();
    }
}

/// Apply `config`, then install the global tracing subscriber.
///
/// A valid config is applied even when a subscriber is already installed;
/// that case still returns [`InitError::Subscriber`], and the filter and
/// format settings of the new config are ignored.
pub fn init_logging(config: &LoggingConfig) -> Result<(), InitError> {
    validate_config(config).map_err(|errors| InitError::Config(ConfigError::Validation(errors)))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    apply_config(config);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(config.ansi)
                .with_target(config.with_target),
        )
        .try_init()?;

    tracing::info!(
        filter = %config.filter,
        default_logger = config.default_logger,
        default_level = %config.default_level,
        "Logging initialized"
    );
    Ok(())
}
