//! # SimpleStream: log-backed stream that always replays from zero.
//!
//! Convenience facade for consumers that always want the full history:
//! `subscribe` takes no offset and pins the cursor to `0`. Everything else —
//! retention, ordering, `join`/`unsubscribe` — matches
//! [`ReplayableStream`](crate::ReplayableStream).

use std::ops::Range;
use std::sync::Arc;

use crate::consumers::ConsumerRef;
use crate::dispatch::Subscription;
use crate::error::PushError;
use crate::log::EventLog;

/// Log-backed event stream whose subscriptions always start at offset `0`.
pub struct SimpleStream<E> {
    log: Arc<EventLog<E>>,
}

impl<E: Send + Sync + 'static> SimpleStream<E> {
    /// Creates a stream over a fresh, empty log.
    pub fn new() -> Self {
        Self {
            log: Arc::new(EventLog::new()),
        }
    }

    /// Publishes one event; returns the index it was assigned.
    pub async fn push(&self, event: E) -> u64 {
        self.log.append(event).await
    }

    /// Publishes a batch atomically; returns the contiguous index range.
    ///
    /// # Errors
    /// [`PushError::EmptyBatch`] if `events` is empty.
    pub async fn push_all(&self, events: Vec<E>) -> Result<Range<u64>, PushError> {
        self.log.push(events).await
    }

    /// Starts a full-replay subscription (cursor at `0`).
    pub fn subscribe(&self, consumer: ConsumerRef<E>) -> Subscription {
        Subscription::start(Arc::clone(&self.log), 0, consumer)
    }
}

impl<E: Send + Sync + 'static> Default for SimpleStream<E> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impl: `#[derive(Clone)]` would require `E: Clone`.
impl<E> Clone for SimpleStream<E> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}
