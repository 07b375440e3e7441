//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex, MutexGuard};

use ctxlog::error::HandlerError;
use ctxlog::{Attr, Context, Handler, Level, Logger, Record};

static GLOBALS: Mutex<()> = Mutex::new(());

/// Serialize tests that touch the global policy or the ambient default.
#[allow(dead_code)]
pub fn lock_globals() -> MutexGuard<'static, ()> {
    GLOBALS.lock().unwrap_or_else(|e| e.into_inner())
}

/// One captured record.
#[derive(Debug, Clone, PartialEq)]
pub struct Captured {
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
    /// Whether the emitting call passed a context through.
    pub with_ctx: bool,
}

/// Handler that records everything it is given. Groups prefix keys with
/// `group.` so forwarding can be checked without a real renderer.
#[derive(Clone, Default)]
pub struct Recorder {
    records: Arc<Mutex<Vec<Captured>>>,
    attrs: Vec<Attr>,
    prefix: String,
}

#[allow(dead_code)]
impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logger(&self) -> Logger {
        Logger::new(self.clone())
    }

    pub fn records(&self) -> Vec<Captured> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    fn qualify(&self, attrs: &[Attr]) -> Vec<Attr> {
        attrs
            .iter()
            .map(|attr| Attr::new(format!("{}{}", self.prefix, attr.key), attr.value.clone()))
            .collect()
    }
}

impl Handler for Recorder {
    fn enabled(&self, _ctx: Option<&Context>, _level: Level) -> bool {
        true
    }

    fn handle(&self, ctx: Option<&Context>, record: Record) -> Result<(), HandlerError> {
        let mut attrs = self.attrs.clone();
        attrs.extend(self.qualify(&record.attrs));
        self.records.lock().unwrap().push(Captured {
            level: record.level,
            message: record.message,
            attrs,
            with_ctx: ctx.is_some(),
        });
        Ok(())
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        let mut next = self.clone();
        next.attrs.extend(self.qualify(attrs));
        Arc::new(next)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut next = self.clone();
        next.prefix = format!("{}{}.", self.prefix, name);
        Arc::new(next)
    }
}
