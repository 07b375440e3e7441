//! Handler that hands records to the `tracing` ecosystem.
//!
//! Output format, filtering beyond the minimum level and sinks are whatever
//! subscriber the host process installs.

use std::sync::Arc;

use crate::context::Context;
use crate::error::HandlerError;
use crate::logger::attr::AttrMap;
use crate::logger::{Attr, Handler, Level, Record};

macro_rules! enabled_at {
    ($level:expr) => {
        match $level {
            tracing::Level::TRACE => tracing::enabled!(target: "ctxlog", tracing::Level::TRACE),
            tracing::Level::DEBUG => tracing::enabled!(target: "ctxlog", tracing::Level::DEBUG),
            tracing::Level::INFO => tracing::enabled!(target: "ctxlog", tracing::Level::INFO),
            tracing::Level::WARN => tracing::enabled!(target: "ctxlog", tracing::Level::WARN),
            tracing::Level::ERROR => tracing::enabled!(target: "ctxlog", tracing::Level::ERROR),
        }
    };
}

macro_rules! event_at {
    ($level:expr, $($fields:tt)+) => {
        match $level {
            tracing::Level::TRACE => tracing::event!(target: "ctxlog", tracing::Level::TRACE, $($fields)+),
            tracing::Level::DEBUG => tracing::event!(target: "ctxlog", tracing::Level::DEBUG, $($fields)+),
            tracing::Level::INFO => tracing::event!(target: "ctxlog", tracing::Level::INFO, $($fields)+),
            tracing::Level::WARN => tracing::event!(target: "ctxlog", tracing::Level::WARN, $($fields)+),
            tracing::Level::ERROR => tracing::event!(target: "ctxlog", tracing::Level::ERROR, $($fields)+),
        }
    };
}

/// One level of group nesting and the attributes fixed inside it.
#[derive(Debug, Clone, Default)]
struct Frame {
    group: String,
    attrs: Vec<Attr>,
}

/// Default [`Handler`]: renders attributes as a JSON object and emits a
/// `tracing` event under target `ctxlog`.
#[derive(Debug, Clone)]
pub struct TracingHandler {
    min_level: Level,
    /// Root frame first; each `with_group` pushes one.
    frames: Vec<Frame>,
}

impl TracingHandler {
    pub fn new() -> Self {
        Self::with_min_level(Level::DEBUG)
    }

    /// Records below `min_level` are dropped before reaching `tracing`.
    pub fn with_min_level(min_level: Level) -> Self {
        Self {
            min_level,
            frames: vec![Frame::default()],
        }
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Copy of this handler with `attrs` fixed in the innermost open group.
    pub fn attrs(&self, attrs: &[Attr]) -> Self {
        let mut next = self.clone();
        if let Some(frame) = next.frames.last_mut() {
            frame.attrs.extend_from_slice(attrs);
        }
        next
    }

    /// Copy of this handler with group `name` opened.
    pub fn group(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.frames.push(Frame {
            group: name.to_string(),
            attrs: Vec::new(),
        });
        next
    }

    /// Fold the frames into one attribute list, placing `tail` in the
    /// innermost group.
    fn collect(&self, tail: Vec<Attr>) -> Vec<Attr> {
        let mut frames = self.frames.iter().rev();
        let Some(innermost) = frames.next() else {
            return tail;
        };

        let mut acc: Vec<Attr> = innermost.attrs.iter().cloned().chain(tail).collect();
        let mut group = innermost.group.clone();
        for frame in frames {
            let nested = Attr::group(std::mem::take(&mut group), acc);
            acc = frame.attrs.iter().cloned().chain(std::iter::once(nested)).collect();
            group = frame.group.clone();
        }
        acc
    }

    /// JSON text of the full attribute set, or `None` when there is nothing
    /// to show.
    pub(crate) fn render(&self, tail: Vec<Attr>) -> Result<Option<String>, HandlerError> {
        let attrs = self.collect(tail);
        if attrs.iter().all(Attr::is_empty) {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(&AttrMap(&attrs))?))
    }
}

impl Default for TracingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for TracingHandler {
    fn enabled(&self, _ctx: Option<&Context>, level: Level) -> bool {
        level >= self.min_level && enabled_at!(level.as_tracing())
    }

    fn handle(&self, ctx: Option<&Context>, record: Record) -> Result<(), HandlerError> {
        let attrs = self.render(record.attrs)?;
        let ctx_err = ctx.and_then(Context::err).map(|err| match err {
            crate::error::ContextError::Canceled => "canceled",
            crate::error::ContextError::DeadlineExceeded => "deadline exceeded",
        });

        event_at!(
            record.level.as_tracing(),
            severity = %record.level,
            attrs = attrs.as_deref(),
            ctx_err = ctx_err,
            "{}",
            record.message
        );
        Ok(())
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(self.attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(self.group(name))
    }
}
