//! Fallback used when a context carries no logger.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;

use crate::logger::{self, Logger};

/// Where a context miss gets its logger from.
#[derive(Clone, Copy)]
enum Provider {
    /// The ambient default, resolved on every call.
    Ambient,
    /// Always absent.
    Disabled,
    Custom(fn() -> Option<Logger>),
}

impl Provider {
    fn resolve(self) -> Option<Logger> {
        match self {
            Provider::Ambient => Some(logger::default()),
            Provider::Disabled => None,
            Provider::Custom(provider) => provider(),
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Ambient => write!(f, "Ambient"),
            Provider::Disabled => write!(f, "Disabled"),
            Provider::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Replaceable supplier of the fallback logger.
///
/// Toggles swap the provider atomically. A lookup racing a toggle sees either
/// the old or the new provider; nothing orders the two. Toggle during setup
/// and teardown, and add your own synchronization if a lookup must observe a
/// particular toggle.
pub struct DefaultLoggerPolicy {
    provider: ArcSwap<Provider>,
}

impl DefaultLoggerPolicy {
    /// A policy that falls back to the ambient default logger.
    pub fn new() -> Self {
        Self::from_provider(Provider::Ambient)
    }

    /// A policy that never supplies a fallback.
    pub fn disabled() -> Self {
        Self::from_provider(Provider::Disabled)
    }

    /// A policy backed by a caller-supplied provider.
    pub fn with_provider(provider: fn() -> Option<Logger>) -> Self {
        Self::from_provider(Provider::Custom(provider))
    }

    fn from_provider(provider: Provider) -> Self {
        Self {
            provider: ArcSwap::from_pointee(provider),
        }
    }

    /// Fall back to the ambient default logger, resolved at lookup time.
    pub fn enable(&self) {
        self.provider.store(Arc::new(Provider::Ambient));
        tracing::debug!(target: "ctxlog::policy", "Default logger enabled");
    }

    /// Stop supplying a fallback. Loggers already handed out are unaffected.
    pub fn disable(&self) {
        self.provider.store(Arc::new(Provider::Disabled));
        tracing::debug!(target: "ctxlog::policy", "Default logger disabled");
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(**self.provider.load(), Provider::Disabled)
    }

    /// Invoke the current provider.
    pub fn resolve(&self) -> Option<Logger> {
        let provider = **self.provider.load();
        provider.resolve()
    }
}

impl Default for DefaultLoggerPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DefaultLoggerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultLoggerPolicy")
            .field("provider", &**self.provider.load())
            .finish()
    }
}

static GLOBAL: Lazy<DefaultLoggerPolicy> = Lazy::new(DefaultLoggerPolicy::new);

/// The process-wide policy consulted by [`from_context`](crate::from_context)
/// and the delegation functions.
pub fn global_policy() -> &'static DefaultLoggerPolicy {
    &GLOBAL
}

/// Make context misses resolve to `None` process-wide.
pub fn disable_default_logger() {
    GLOBAL.disable();
}

/// Make context misses resolve to the ambient default logger process-wide.
pub fn enable_default_logger() {
    GLOBAL.enable();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::TracingHandler;

    static CUSTOM: Lazy<Logger> = Lazy::new(|| Logger::new(TracingHandler::new()));

    fn custom() -> Option<Logger> {
        Some(CUSTOM.clone())
    }

    #[test]
    fn test_toggle() {
        let policy = DefaultLoggerPolicy::new();
        assert!(policy.is_enabled());
        assert!(policy.resolve().is_some());

        policy.disable();
        assert!(!policy.is_enabled());
        assert!(policy.resolve().is_none());

        policy.enable();
        assert!(policy.resolve().is_some());
    }

    #[test]
    fn test_disabled_constructor() {
        assert!(DefaultLoggerPolicy::disabled().resolve().is_none());
    }

    #[test]
    fn test_custom_provider() {
        let policy = DefaultLoggerPolicy::with_provider(custom);
        assert_eq!(policy.resolve(), Some(CUSTOM.clone()));

        policy.disable();
        assert!(policy.resolve().is_none());
    }
}
