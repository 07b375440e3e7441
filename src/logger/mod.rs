//! Structured logger handle.
//!
//! # Responsibilities
//! - Leveled, structured emission (`debug`..`error`, `log`, `log_attrs`)
//! - Context-aware emission variants that pass the request context through
//! - Derived loggers carrying extra attributes or a named group
//! - The process-wide ambient default logger
//!
//! # Design Decisions
//! - `Logger` is a cheap `Arc` handle; deriving never mutates the receiver
//! - Output is the handler's business; the default handler feeds `tracing`,
//!   so formatting and sinks belong to whatever subscriber is installed
//! - Emission is infallible: handler errors are reported once on the
//!   crate's own target and otherwise dropped

mod attr;
#[cfg(test)]
mod capture;
mod handler;
mod level;
mod tracing_handler;

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;

use crate::context::Context;

pub use attr::{Attr, Value};
pub use handler::{Handler, Record};
pub use level::{Level, ParseLevelError};
pub use tracing_handler::TracingHandler;

/// A handle to a structured logging sink.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    pub fn new(handler: impl Handler + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Whether this logger and `other` share the same handler instance.
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.handler) as *const (),
            Arc::as_ptr(&other.handler) as *const (),
        )
    }

    /// A logger whose records also carry `attrs`.
    pub fn with(&self, attrs: &[Attr]) -> Logger {
        if attrs.is_empty() {
            return self.clone();
        }
        Self::from_handler(self.handler.with_attrs(attrs))
    }

    /// A logger that qualifies every later attribute under `name`.
    ///
    /// An empty name returns the receiver unchanged.
    pub fn with_group(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.clone();
        }
        Self::from_handler(self.handler.with_group(name))
    }

    pub fn enabled(&self, ctx: Option<&Context>, level: Level) -> bool {
        self.handler.enabled(ctx, level)
    }

    fn emit(&self, ctx: Option<&Context>, level: Level, msg: &str, attrs: Vec<Attr>) {
        if !self.handler.enabled(ctx, level) {
            return;
        }
        if let Err(e) = self.handler.handle(ctx, Record::new(level, msg, attrs)) {
            tracing::warn!(target: "ctxlog::handler", error = %e, %level, "Dropped log record");
        }
    }

    /// Emit at `level`, copying `attrs` into the record.
    pub fn log(&self, ctx: Option<&Context>, level: Level, msg: &str, attrs: &[Attr]) {
        self.emit(ctx, level, msg, attrs.to_vec());
    }

    /// Emit at `level`, moving `attrs` into the record.
    pub fn log_attrs(&self, ctx: Option<&Context>, level: Level, msg: &str, attrs: Vec<Attr>) {
        self.emit(ctx, level, msg, attrs);
    }

    pub fn debug(&self, msg: &str, attrs: &[Attr]) {
        self.log(None, Level::DEBUG, msg, attrs);
    }

    pub fn debug_ctx(&self, ctx: &Context, msg: &str, attrs: &[Attr]) {
        self.log(Some(ctx), Level::DEBUG, msg, attrs);
    }

    pub fn info(&self, msg: &str, attrs: &[Attr]) {
        self.log(None, Level::INFO, msg, attrs);
    }

    pub fn info_ctx(&self, ctx: &Context, msg: &str, attrs: &[Attr]) {
        self.log(Some(ctx), Level::INFO, msg, attrs);
    }

    pub fn warn(&self, msg: &str, attrs: &[Attr]) {
        self.log(None, Level::WARN, msg, attrs);
    }

    pub fn warn_ctx(&self, ctx: &Context, msg: &str, attrs: &[Attr]) {
        self.log(Some(ctx), Level::WARN, msg, attrs);
    }

    pub fn error(&self, msg: &str, attrs: &[Attr]) {
        self.log(None, Level::ERROR, msg, attrs);
    }

    pub fn error_ctx(&self, ctx: &Context, msg: &str, attrs: &[Attr]) {
        self.log(Some(ctx), Level::ERROR, msg, attrs);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(TracingHandler::new())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("handler", &Arc::as_ptr(&self.handler))
            .finish()
    }
}

/// Loggers compare equal when they share a handler instance.
impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

static AMBIENT: Lazy<ArcSwap<Logger>> = Lazy::new(|| ArcSwap::from_pointee(Logger::default()));

/// The current ambient default logger.
pub fn default() -> Logger {
    AMBIENT.load().as_ref().clone()
}

/// Replace the ambient default logger. Already retrieved handles keep the
/// logger they were given.
pub fn set_default(logger: Logger) {
    AMBIENT.store(Arc::new(logger));
}
