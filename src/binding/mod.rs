//! Logger ↔ context binding.
//!
//! # Responsibilities
//! - Store a logger (or an explicit "no logger") in a context
//! - Retrieve it again, falling back to the default-logger policy on a miss
//! - Forward logging calls to whatever logger a context resolves to
//!
//! # Data Flow
//! ```text
//! new_context(ctx, logger) → child context with private key
//!
//! from_context(ctx)
//!     → Bound(logger)  → logger
//!     → Silenced       → None (policy not consulted)
//!     → Unbound        → policy.resolve()
//!
//! info(ctx, ..) → from_context(ctx) → Logger::info / no-op
//! ```
//!
//! # Design Decisions
//! - Lookup is presence-checked so that storing `None` silences a subtree
//!   regardless of the ambient default
//! - Nothing here can fail; an absent logger is a quiet no-op

mod delegate;
mod policy;

use crate::context::Context;
use crate::logger::Logger;

pub use delegate::*;
pub use policy::{disable_default_logger, enable_default_logger, global_policy, DefaultLoggerPolicy};

/// Private key type; no other crate can name it.
#[derive(PartialEq)]
struct LoggerKey;

/// Result of looking up the logger slot of a context.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A logger was stored.
    Bound(Logger),
    /// An explicit `None` was stored.
    Silenced,
    /// Nothing was stored anywhere along the chain.
    Unbound,
}

impl Binding {
    /// Collapse to an optional logger, calling `fallback` only when unbound.
    pub fn into_logger(self, fallback: impl FnOnce() -> Option<Logger>) -> Option<Logger> {
        match self {
            Binding::Bound(logger) => Some(logger),
            Binding::Silenced => None,
            Binding::Unbound => fallback(),
        }
    }
}

/// Derive a context carrying `logger`. A `None` context starts from
/// [`Context::background`].
pub fn new_context(ctx: Option<&Context>, logger: Option<Logger>) -> Context {
    match ctx {
        Some(ctx) => ctx.with_value(LoggerKey, logger),
        None => Context::background().with_value(LoggerKey, logger),
    }
}

/// The raw three-state lookup.
pub fn binding(ctx: &Context) -> Binding {
    match ctx.value::<_, Option<Logger>>(&LoggerKey) {
        Some(Some(logger)) => Binding::Bound(logger.clone()),
        Some(None) => Binding::Silenced,
        None => Binding::Unbound,
    }
}

/// The logger stored in `ctx`, or the global policy's fallback if none was.
pub fn from_context(ctx: &Context) -> Option<Logger> {
    from_context_with(ctx, global_policy())
}

/// Like [`from_context`], against a caller-owned policy.
pub fn from_context_with(ctx: &Context, policy: &DefaultLoggerPolicy) -> Option<Logger> {
    binding(ctx).into_logger(|| policy.resolve())
}

impl Context {
    /// Derive a child carrying `logger`; see [`new_context`].
    pub fn with_logger(&self, logger: Option<Logger>) -> Context {
        new_context(Some(self), logger)
    }
}
