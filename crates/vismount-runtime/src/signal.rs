#![forbid(unsafe_code)]

//! Shared resize broadcast with RAII subscriptions.
//!
//! The host owns one [`ResizeSignal`] per window-like display surface and
//! emits on every raw resize notification. Each mounted controller holds
//! at most one [`ResizeSubscription`]; dropping the guard removes the
//! callback, so unmount (or an aborted mount being dropped) can never
//! leak a listener.
//!
//! # Invariants
//!
//! 1. Subscribers are invoked in registration order.
//! 2. Dropping a [`ResizeSubscription`] removes its callback before the
//!    next emit.
//! 3. Emitting with no subscribers is a no-op.
//! 4. A guard outliving the signal is inert (weak inner reference).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback = Rc<dyn Fn()>;

#[derive(Default)]
struct SignalInner {
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

/// Broadcast handle for raw resize notifications. Cheap to clone; clones
/// share the subscriber list.
#[derive(Clone, Default)]
pub struct ResizeSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl ResizeSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` and return its RAII guard.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> ResizeSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Rc::new(callback)));
        ResizeSubscription {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Invoke every live subscriber in registration order.
    pub fn emit(&self) {
        // Snapshot first so a callback may subscribe or drop a guard
        // without aliasing the borrow.
        let callbacks: Vec<Callback> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl fmt::Debug for ResizeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeSignal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// RAII guard for one resize subscription.
pub struct ResizeSubscription {
    inner: Weak<RefCell<SignalInner>>,
    id: u64,
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .borrow_mut()
                .subscribers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeSubscription")
            .field("id", &self.id)
            .field("live", &(self.inner.strong_count() > 0))
            .finish()
    }
}
