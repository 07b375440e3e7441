//! Cancellation signalling for contexts.

use std::sync::{Arc, Mutex, Weak};
use tokio::sync::watch;

/// Shared cancellation state of one cancellable context.
///
/// A watch channel carries the flag so that late subscribers still observe a
/// cancellation that already happened.
#[derive(Debug)]
pub(crate) struct CancelState {
    /// Watch channel sender; `true` once cancelled.
    tx: watch::Sender<bool>,
    /// Cancellable contexts derived from this one.
    children: Mutex<Vec<Weak<CancelState>>>,
}

impl CancelState {
    /// Create a new state, linked under `parent` when there is one.
    pub(crate) fn new(parent: Option<&Arc<CancelState>>) -> Arc<Self> {
        let (tx, _) = watch::channel(false);
        let state = Arc::new(Self {
            tx,
            children: Mutex::new(Vec::new()),
        });

        if let Some(parent) = parent {
            let mut children = parent.children.lock().unwrap_or_else(|e| e.into_inner());
            if parent.is_canceled() {
                drop(children);
                state.cancel();
            } else {
                children.retain(|child| child.strong_count() > 0);
                children.push(Arc::downgrade(&state));
            }
        }

        state
    }

    pub(crate) fn is_canceled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Trigger cancellation here and in every live descendant.
    pub(crate) fn cancel(&self) {
        // The flag flips under the children lock so a concurrent `new` either
        // sees it or gets registered before the children are taken.
        let children = {
            let mut children = self.children.lock().unwrap_or_else(|e| e.into_inner());
            if self.tx.send_replace(true) {
                return;
            }
            std::mem::take(&mut *children)
        };

        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }

    /// Subscribe to the cancellation flag.
    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Handle that cancels the context returned alongside it by
/// [`Context::with_cancel`](crate::Context::with_cancel).
///
/// Dropping the handle does not cancel anything.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    pub(crate) state: Arc<CancelState>,
}

impl CancelHandle {
    /// Cancel the associated context and everything derived from it.
    pub fn cancel(&self) {
        self.state.cancel();
    }

    /// Whether the associated context has been cancelled, directly or
    /// through an ancestor.
    pub fn is_canceled(&self) -> bool {
        self.state.is_canceled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_propagates_down() {
        let parent = CancelState::new(None);
        let child = CancelState::new(Some(&parent));
        let grandchild = CancelState::new(Some(&child));

        parent.cancel();

        assert!(child.is_canceled());
        assert!(grandchild.is_canceled());
    }

    #[test]
    fn test_cancel_does_not_propagate_up() {
        let parent = CancelState::new(None);
        let child = CancelState::new(Some(&parent));

        child.cancel();

        assert!(child.is_canceled());
        assert!(!parent.is_canceled());
    }

    #[test]
    fn test_child_of_canceled_parent_starts_canceled() {
        let parent = CancelState::new(None);
        parent.cancel();

        let child = CancelState::new(Some(&parent));
        assert!(child.is_canceled());
    }

    #[test]
    fn test_dead_children_are_pruned() {
        let parent = CancelState::new(None);
        for _ in 0..8 {
            drop(CancelState::new(Some(&parent)));
        }
        let _live = CancelState::new(Some(&parent));

        assert_eq!(parent.children.lock().unwrap().len(), 1);
    }
}
