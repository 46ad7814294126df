//! # ReplayableStream: log-backed stream with historical subscriptions.
//!
//! The full-featured facade: every pushed event is retained, and a
//! subscription may start at any offset — `0` for a complete replay, the
//! current tail for live-only delivery, or anything in between.

use std::ops::Range;
use std::sync::Arc;

use crate::consumers::ConsumerRef;
use crate::dispatch::Subscription;
use crate::error::PushError;
use crate::log::EventLog;

use super::PlainStream;

/// Log-backed event stream supporting replay from any historical offset.
///
/// Cloning the stream shares the underlying log; producers and consumers may
/// hold independent clones.
pub struct ReplayableStream<E> {
    log: Arc<EventLog<E>>,
}

impl<E: Send + Sync + 'static> ReplayableStream<E> {
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

    /// Starts a subscription with its cursor at `offset`.
    ///
    /// Offset `0` replays the full history before switching to live
    /// delivery; the subscription never receives an event with an index
    /// below `offset`.
    pub fn subscribe(&self, offset: u64, consumer: ConsumerRef<E>) -> Subscription {
        Subscription::start(Arc::clone(&self.log), offset, consumer)
    }

    /// Returns the payload-only view over the same log.
    ///
    /// The view strips indices and always subscribes from offset `0`.
    pub fn plain(&self) -> PlainStream<E> {
        PlainStream::over(Arc::clone(&self.log))
    }

    /// Number of events pushed so far.
    pub async fn len(&self) -> u64 {
        self.log.len().await
    }

    /// True if nothing has been pushed yet.
    pub async fn is_empty(&self) -> bool {
        self.log.is_empty().await
    }
}

impl<E: Send + Sync + 'static> Default for ReplayableStream<E> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impl: `#[derive(Clone)]` would require `E: Clone`.
impl<E> Clone for ReplayableStream<E> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}
