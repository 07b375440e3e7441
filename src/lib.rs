//! Context-scoped structured logging.
//!
//! A [`Logger`] rides along in an immutable request [`Context`]. Code deep in
//! a call stack logs through whatever logger its caller bound, without
//! threading a logger parameter everywhere:
//!
//! ```
//! use ctxlog::{Attr, Logger};
//!
//! let ctx = ctxlog::new_context(None, Some(Logger::default().with(&[Attr::string("req", "42")])));
//! ctxlog::info(&ctx, "handling request", &[Attr::int("attempt", 1)]);
//!
//! // An explicit `None` silences a subtree, whatever the default is.
//! let quiet = ctx.with_logger(None);
//! assert!(ctxlog::from_context(&quiet).is_none());
//! ```
//!
//! When a context carries no logger, lookups fall back to the ambient default
//! logger unless [`disable_default_logger`] was called.

pub mod binding;
pub mod config;
pub mod context;
pub mod error;
pub mod logger;
pub mod observability;

pub use binding::*;
pub use config::LoggingConfig;
pub use context::{CancelHandle, Context};
pub use logger::{Attr, Handler, Level, Logger, Record, TracingHandler, Value};
