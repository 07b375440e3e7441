//! Error types.
//!
//! None of these ever escape the binding or delegation functions: those are
//! total. They surface from context inspection, handler backends and
//! configuration loading only.

use thiserror::Error;

/// Why a context is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context canceled")]
    Canceled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Failure reported by a [`Handler`](crate::logger::Handler).
///
/// `Logger` drops these after a diagnostic event; callers never see them.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to render attributes: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("handler error: {0}")]
    Other(String),
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Error type for subscriber installation.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid filter directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("global subscriber already installed: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
