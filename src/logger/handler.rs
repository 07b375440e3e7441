//! Handler backends.

use std::sync::Arc;
use std::time::SystemTime;

use crate::context::Context;
use crate::error::HandlerError;
use crate::logger::{Attr, Level};

/// A single log event, as handed to a [`Handler`].
#[derive(Debug, Clone)]
pub struct Record {
    pub time: SystemTime,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            time: SystemTime::now(),
            level,
            message: message.into(),
            attrs,
        }
    }
}

/// Backend that a [`Logger`](crate::Logger) forwards records to.
///
/// Implementations are immutable: `with_attrs` and `with_group` return a new
/// handler and leave the receiver as it was.
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be handled.
    fn enabled(&self, ctx: Option<&Context>, level: Level) -> bool;

    /// Handle one record. Only called when `enabled` returned true.
    fn handle(&self, ctx: Option<&Context>, record: Record) -> Result<(), HandlerError>;

    /// A handler whose records also carry `attrs`, qualified by any groups
    /// already opened on this handler.
    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler>;

    /// A handler that nests all later attributes under `name`.
    /// Never called with an empty name.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}
