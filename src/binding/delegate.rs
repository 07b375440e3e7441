//! Free functions that log through the logger a context resolves to.
//!
//! Each one calls [`from_context`] and forwards its arguments untouched.
//! When no logger resolves, emitters do nothing and derivers return `None`.

use crate::binding::from_context;
use crate::context::Context;
use crate::logger::{Attr, Level, Logger};

/// [`Logger::with`] on the context's logger.
pub fn with(ctx: &Context, attrs: &[Attr]) -> Option<Logger> {
    from_context(ctx).map(|logger| logger.with(attrs))
}

/// [`Logger::with_group`] on the context's logger.
pub fn with_group(ctx: &Context, name: &str) -> Option<Logger> {
    from_context(ctx).map(|logger| logger.with_group(name))
}

/// [`Logger::debug`] on the context's logger.
pub fn debug(ctx: &Context, msg: &str, attrs: &[Attr]) {
    if let Some(logger) = from_context(ctx) {
        logger.debug(msg, attrs);
    }
}

/// [`Logger::debug_ctx`] on the context's logger, with `ctx` passed through.
pub fn debug_ctx(ctx: &Context, msg: &str, attrs: &[Attr]) {
    if let Some(logger) = from_context(ctx) {
        logger.debug_ctx(ctx, msg, attrs);
    }
}

/// [`Logger::info`] on the context's logger.
pub fn info(ctx: &Context, msg: &str, attrs: &[Attr]) {
    if let Some(logger) = from_context(ctx) {
        logger.info(msg, attrs);
    }
}

/// [`Logger::info_ctx`] on the context's logger, with `ctx` passed through.
pub fn info_ctx(ctx: &Context, msg: &str, attrs: &[Attr]) {
    if let Some(logger) = from_context(ctx) {
        logger.info_ctx(ctx, msg, attrs);
    }
}

/// [`Logger::warn`] on the context's logger.
pub fn warn(ctx: &Context, msg: &str, attrs: &[Attr]) {
    if let Some(logger) = from_context(ctx) {
        logger.warn(msg, attrs);
    }
}

/// [`Logger::warn_ctx`] on the context's logger, with `ctx` passed through.
pub fn warn_ctx(ctx: &Context, msg: &str, attrs: &[Attr]) {
    if let Some(logger) = from_context(ctx) {
        logger.warn_ctx(ctx, msg, attrs);
    }
}

/// [`Logger::error`] on the context's logger.
pub fn error(ctx: &Context, msg: &str, attrs: &[Attr]) {
    if let Some(logger) = from_context(ctx) {
        logger.error(msg, attrs);
    }
}

/// [`Logger::error_ctx`] on the context's logger, with `ctx` passed through.
pub fn error_ctx(ctx: &Context, msg: &str, attrs: &[Attr]) {
    if let Some(logger) = from_context(ctx) {
        logger.error_ctx(ctx, msg, attrs);
    }
}

/// [`Logger::log`] with `ctx` passed through.
pub fn log(ctx: &Context, level: Level, msg: &str, attrs: &[Attr]) {
    if let Some(logger) = from_context(ctx) {
        logger.log(Some(ctx), level, msg, attrs);
    }
}

/// [`Logger::log_attrs`] with `ctx` passed through.
pub fn log_attrs(ctx: &Context, level: Level, msg: &str, attrs: Vec<Attr>) {
    if let Some(logger) = from_context(ctx) {
        logger.log_attrs(Some(ctx), level, msg, attrs);
    }
}
