//! Request-scoped context.
//!
//! # Responsibilities
//! - Carry request-scoped values from caller to callee
//! - Carry a deadline and a cancellation signal
//! - Never mutate a context once it has been handed out
//!
//! # Data Flow
//! ```text
//! Context::background()
//!     → with_value / with_deadline / with_cancel (derive child node)
//!     → child handed down the call stack
//!     → value / deadline / err walk child → root
//! ```
//!
//! # Design Decisions
//! - Persistent linked list of `Arc` nodes: cloning is a refcount bump and
//!   deriving never touches the parent
//! - Keys are typed; a private key type cannot collide with anyone else's
//! - Cancellation propagates parent → child through registered weak links,
//!   so each context only watches its nearest cancellable ancestor

mod cancel;

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::ContextError;
use cancel::CancelState;

pub use cancel::CancelHandle;

/// Type-erased context key.
trait ContextKey: Send + Sync {
    fn matches(&self, other: &dyn Any) -> bool;
}

impl<K> ContextKey for K
where
    K: Any + PartialEq + Send + Sync,
{
    fn matches(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<K>().is_some_and(|k| k == self)
    }
}

enum Entry {
    Value {
        key: Box<dyn ContextKey>,
        value: Box<dyn Any + Send + Sync>,
    },
    Deadline(Instant),
    Cancel(Arc<CancelState>),
}

struct Node {
    parent: Context,
    entry: Entry,
}

/// An immutable, cheaply cloneable carrier of request-scoped data.
#[derive(Clone, Default)]
pub struct Context {
    node: Option<Arc<Node>>,
}

impl Context {
    /// An empty root context. Never cancelled, no deadline, no values.
    pub fn background() -> Self {
        Self { node: None }
    }

    fn derive(&self, entry: Entry) -> Self {
        Self {
            node: Some(Arc::new(Node {
                parent: self.clone(),
                entry,
            })),
        }
    }

    fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        let mut cursor = self.node.as_deref();
        std::iter::from_fn(move || {
            let node = cursor?;
            cursor = node.parent.node.as_deref();
            Some(&node.entry)
        })
    }

    /// Derive a child context carrying `value` under `key`.
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Any + PartialEq + Send + Sync,
        V: Any + Send + Sync,
    {
        self.derive(Entry::Value {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    /// Look up the value stored under `key`, nearest derivation first.
    ///
    /// Returns `None` if no ancestor carries the key, or if the nearest one
    /// that does holds a value of another type.
    pub fn value<K, V>(&self, key: &K) -> Option<&V>
    where
        K: Any + PartialEq + Send + Sync,
        V: Any,
    {
        self.entries().find_map(|entry| match entry {
            Entry::Value { key: stored, value } if stored.matches(key) => Some(value.downcast_ref::<V>()),
            _ => None,
        })?
    }

    /// Derive a child context that expires at `deadline`.
    ///
    /// An earlier deadline inherited from an ancestor still wins.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        self.derive(Entry::Deadline(deadline))
    }

    /// Derive a child context that expires `timeout` from now.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derive a cancellable child context.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let state = CancelState::new(self.cancel_state());
        let handle = CancelHandle {
            state: state.clone(),
        };
        (self.derive(Entry::Cancel(state)), handle)
    }

    fn cancel_state(&self) -> Option<&Arc<CancelState>> {
        self.entries().find_map(|entry| match entry {
            Entry::Cancel(state) => Some(state),
            _ => None,
        })
    }

    /// The earliest deadline along the chain.
    pub fn deadline(&self) -> Option<Instant> {
        self.entries()
            .filter_map(|entry| match entry {
                Entry::Deadline(at) => Some(*at),
                _ => None,
            })
            .min()
    }

    /// Why this context is done, or `None` while it is still live.
    ///
    /// Cancellation is reported ahead of an expired deadline.
    pub fn err(&self) -> Option<ContextError> {
        if self.cancel_state().is_some_and(|state| state.is_canceled()) {
            return Some(ContextError::Canceled);
        }
        match self.deadline() {
            Some(at) if Instant::now() >= at => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Wait until this context is done.
    ///
    /// Pends forever for a context with neither deadline nor cancellation.
    pub async fn done(&self) -> ContextError {
        if let Some(err) = self.err() {
            return err;
        }

        let cancel = self.cancel_state().map(|state| state.subscribe());
        let deadline = self.deadline();

        let canceled = async move {
            match cancel {
                Some(mut rx) => {
                    // The sender lives inside the node this context holds.
                    let closed = rx.wait_for(|canceled| *canceled).await.is_err();
                    if closed {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };
        let expired = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = canceled => ContextError::Canceled,
            _ = expired => ContextError::DeadlineExceeded,
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("depth", &self.entries().count())
            .field("deadline", &self.deadline())
            .field("err", &self.err())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(PartialEq)]
    struct RequestId;

    #[derive(PartialEq)]
    struct OtherKey;

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert!(ctx.value::<_, String>(&RequestId).is_none());
        assert!(ctx.deadline().is_none());
        assert!(ctx.err().is_none());
    }

    #[test]
    fn test_value_lookup_walks_parents() {
        let root = Context::background().with_value(RequestId, "req-1".to_string());
        let child = root.with_value(OtherKey, 7u32);

        assert_eq!(child.value::<_, String>(&RequestId).map(String::as_str), Some("req-1"));
        assert_eq!(child.value::<_, u32>(&OtherKey), Some(&7));
        assert!(root.value::<_, u32>(&OtherKey).is_none());
    }

    #[test]
    fn test_child_shadows_parent() {
        let parent = Context::background().with_value(RequestId, 1u8);
        let child = parent.with_value(RequestId, 2u8);

        assert_eq!(child.value::<_, u8>(&RequestId), Some(&2));
        assert_eq!(parent.value::<_, u8>(&RequestId), Some(&1));
    }

    #[test]
    fn test_keys_compare_by_value() {
        let ctx = Context::background()
            .with_value("tenant", 1u8)
            .with_value("region", 2u8);

        assert_eq!(ctx.value::<_, u8>(&"tenant"), Some(&1));
        assert_eq!(ctx.value::<_, u8>(&"region"), Some(&2));
        assert!(ctx.value::<_, u8>(&"zone").is_none());
    }

    #[test]
    fn test_type_mismatch_does_not_fall_through() {
        let ctx = Context::background()
            .with_value(RequestId, 1u8)
            .with_value(RequestId, "two");

        assert!(ctx.value::<_, u8>(&RequestId).is_none());
    }

    #[test]
    fn test_earliest_deadline_wins() {
        let now = Instant::now();
        let early = now + Duration::from_secs(5);
        let late = now + Duration::from_secs(50);

        let ctx = Context::background().with_deadline(early).with_deadline(late);
        assert_eq!(ctx.deadline(), Some(early));
    }

    #[test]
    fn test_expired_deadline_reports_err() {
        let ctx = Context::background().with_deadline(Instant::now() - Duration::from_millis(1));
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
    }

    #[test]
    fn test_cancel_reaches_derived_contexts() {
        let (ctx, handle) = Context::background().with_cancel();
        let child = ctx.with_value(RequestId, 1u8);
        let (grandchild, _inner) = child.with_cancel();

        handle.cancel();

        assert_eq!(ctx.err(), Some(ContextError::Canceled));
        assert_eq!(child.err(), Some(ContextError::Canceled));
        assert_eq!(grandchild.err(), Some(ContextError::Canceled));
    }

    #[test]
    fn test_cancel_does_not_reach_parent() {
        let (parent, _parent_handle) = Context::background().with_cancel();
        let (child, child_handle) = parent.with_cancel();

        child_handle.cancel();

        assert!(parent.err().is_none());
        assert_eq!(child.err(), Some(ContextError::Canceled));
    }

    #[tokio::test]
    async fn test_done_on_cancel() {
        let (ctx, handle) = Context::background().with_cancel();
        let waiter = {
            let ctx = ctx.clone();
            tokio::spawn(async move { ctx.done().await })
        };

        handle.cancel();
        assert_eq!(waiter.await.unwrap(), ContextError::Canceled);
    }

    #[tokio::test]
    async fn test_done_on_deadline() {
        let ctx = Context::background().with_timeout(Duration::from_millis(20));
        assert_eq!(ctx.done().await, ContextError::DeadlineExceeded);
    }
}
