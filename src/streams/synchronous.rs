//! # SynchronousStream: direct fan-out with no log behind it.
//!
//! The lightweight alternative for pure in-process notification: no
//! retention, no replay, no background tasks. `push` walks the registered
//! callbacks and invokes each one synchronously, in registration order, on
//! the caller's thread.
//!
//! ## Rules
//! - Delivery order across callbacks is registration order at push time.
//! - There is no ordering guarantee beyond single-threaded delivery order;
//!   concurrent pushers interleave arbitrarily.
//! - Callbacks registered during a push see only later pushes; callbacks
//!   removed during a push may still receive the in-flight event. The
//!   callback list is snapshotted before invocation, so a callback may
//!   subscribe or unsubscribe reentrantly without deadlocking.
//! - A panicking callback propagates on the pusher's thread; there is no
//!   isolation here, unlike log-backed subscriptions.
//!
//! Choose this facade when the replay and catch-up semantics of the full log
//! are unnecessary overhead.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::error::PushError;

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registration<E> {
    id: u64,
    callback: Callback<E>,
}

/// Direct, synchronous fan-out stream.
///
/// Cloning shares the callback registry.
pub struct SynchronousStream<E> {
    registry: Arc<Mutex<Vec<Registration<E>>>>,
    next_id: Arc<AtomicU64>,
}

impl<E> SynchronousStream<E> {
    /// Creates a stream with no registered callbacks.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Delivers one event to every registered callback, in registration
    /// order, on the calling thread.
    pub fn push(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = {
            let registry = self
                .registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            registry.iter().map(|r| Arc::clone(&r.callback)).collect()
        };
        for callback in snapshot {
            callback(event);
        }
    }

    /// Delivers a batch in order. An empty batch is a usage error.
    ///
    /// # Errors
    /// [`PushError::EmptyBatch`] if `events` is empty.
    pub fn push_all(&self, events: &[E]) -> Result<(), PushError> {
        if events.is_empty() {
            return Err(PushError::EmptyBatch);
        }
        for event in events {
            self.push(event);
        }
        Ok(())
    }

    /// Registers a callback; it receives every subsequent push until the
    /// returned handle unsubscribes it.
    pub fn subscribe(&self, callback: impl Fn(&E) + Send + Sync + 'static) -> SyncSubscription<E> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Registration {
                id,
                callback: Arc::new(callback),
            });
        SyncSubscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for SynchronousStream<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for SynchronousStream<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

/// Removable registration handle for a [`SynchronousStream`] callback.
///
/// Holds only a weak reference: dropping the stream drops the registry and
/// the handle becomes a no-op.
pub struct SyncSubscription<E> {
    id: u64,
    registry: Weak<Mutex<Vec<Registration<E>>>>,
}

impl<E> SyncSubscription<E> {
    /// Removes the callback from the stream. Idempotent.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|r| r.id != self.id);
        }
    }
}
