//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! LoggingConfig
//!     → logging.rs
//!         → tracing-subscriber registry (EnvFilter + fmt layer)
//!         → ambient default logger (TracingHandler at default_level)
//!         → global default-logger policy (enabled / disabled)
//!
//! Context-scoped loggers
//!     → TracingHandler → tracing events → installed subscriber
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured filter
//! - Only the first successful `init_logging` installs a subscriber; later
//!   calls return an error but still apply the default-logger settings
//! - `apply_config` alone reconfigures the default logger without touching
//!   the subscriber

pub mod logging;

pub use logging::{apply_config, init_logging};
