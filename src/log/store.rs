//! # EventLog: append-only ordered event sequence.
//!
//! [`EventLog`] is the single source of truth for event ordering. Producers
//! append from any number of tasks; each append assigns the next sequential
//! index under a writer-exclusive critical section. Readers snapshot through
//! the shared side of the lock and never block appends for longer than O(1).
//!
//! ## Architecture
//! ```text
//! Producers (many):                     Readers (many):
//!   append(ev) ──┐                        poll(i)  ── non-blocking
//!   push(batch) ─┼──► RwLock<Vec<Arc<E>>> take(i)  ── suspends until index i
//!                │          │
//!                └──► watch::Sender<u64>  (log length, re-armed per append)
//!                           │
//!                           └──► wakes every `take` blocked on a
//!                                not-yet-available index
//! ```
//!
//! ## Guarantees
//! - Indices are unique, gapless (`0, 1, 2, …`), and never reused.
//! - A batch `push` is atomic with respect to other producers: its indices
//!   are contiguous and no foreign event is interleaved.
//! - `poll` never blocks on "not yet available"; `take` never skips ahead of
//!   the requested index.
//! - The log never truncates. Retention is unbounded for the life of the
//!   process; callers with very long-lived logs must account for that.

use std::ops::Range;
use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tokio_util::sync::CancellationToken;

use crate::error::{PushError, TakeError};

use super::Envelope;

/// Append-only, in-memory event log with blocking and non-blocking reads.
///
/// The type parameter `E` is the opaque application payload; one log instance
/// carries exactly one payload type. Stored events are shared as `Arc<E>`, so
/// `E` itself needs no `Clone`.
pub struct EventLog<E> {
    /// Backing sequence. The write guard is held only for the O(1) append.
    entries: RwLock<Vec<Arc<E>>>,
    /// Generation signal: carries the current length, updated on every
    /// append while the write guard is held so waiters never observe the
    /// watermark moving backwards.
    head: watch::Sender<u64>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventLog<E> {
    /// Creates an empty log.
    pub fn new() -> Self {
        let (head, _) = watch::channel(0);
        Self {
            entries: RwLock::new(Vec::new()),
            head,
        }
    }

    /// Number of events appended so far (also the next index to be assigned).
    pub async fn len(&self) -> u64 {
        self.entries.read().await.len() as u64
    }

    /// True if nothing has been appended yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Returns a receiver observing the log length.
    ///
    /// The value changes on every append; `0` means empty. Used by the
    /// dispatch layer so `join()` can read the tail position without
    /// touching the entry lock.
    pub(crate) fn watermark(&self) -> watch::Receiver<u64> {
        self.head.subscribe()
    }

    /// Appends one event and returns the index it was assigned.
    ///
    /// Safe under concurrent producers: the write guard serializes index
    /// assignment, so no event is lost, reordered relative to other appends,
    /// or given a duplicate index. Every waiter blocked in [`take`] on a
    /// not-yet-available index is woken.
    ///
    /// [`take`]: EventLog::take
    pub async fn append(&self, event: E) -> u64 {
        let mut entries = self.entries.write().await;
        let index = entries.len() as u64;
        entries.push(Arc::new(event));
        self.head.send_replace(entries.len() as u64);
        index
    }

    /// Appends a batch atomically and returns the contiguous index range.
    ///
    /// No other producer's event is interleaved within the batch; the batch
    /// keeps its internal order. An empty batch is a usage error.
    ///
    /// # Errors
    /// [`PushError::EmptyBatch`] if `events` is empty.
    pub async fn push(&self, events: Vec<E>) -> Result<Range<u64>, PushError> {
        if events.is_empty() {
            return Err(PushError::EmptyBatch);
        }
        let mut entries = self.entries.write().await;
        let start = entries.len() as u64;
        entries.extend(events.into_iter().map(Arc::new));
        let end = entries.len() as u64;
        self.head.send_replace(end);
        Ok(start..end)
    }

    /// Non-blocking read of exactly index `from`.
    ///
    /// Returns `None` when the index has not been appended yet; "not yet
    /// available" is never an error.
    pub async fn poll(&self, from: u64) -> Option<Envelope<E>> {
        let entries = self.entries.read().await;
        let slot = usize::try_from(from).ok()?;
        entries
            .get(slot)
            .map(|event| Envelope::new(from, Arc::clone(event)))
    }

    /// Blocking read of exactly index `from`.
    ///
    /// Suspends until an event at `from` exists, then returns that envelope —
    /// never a later one, even when later indices are already available.
    ///
    /// Cancellation is cooperative: when `cancel` fires while the caller is
    /// suspended, the wait ends with [`TakeError::Cancelled`] instead of a
    /// delivery. The check is biased toward cancellation, so a token that is
    /// already cancelled wins over an event that is already available.
    ///
    /// There is no built-in timeout; layer a deadline over `cancel` if a
    /// bounded wait is needed.
    ///
    /// # Errors
    /// [`TakeError::Cancelled`] when `cancel` fires before index `from`
    /// exists.
    pub async fn take(
        &self,
        from: u64,
        cancel: &CancellationToken,
    ) -> Result<Envelope<E>, TakeError> {
        let mut head = self.head.subscribe();
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TakeError::Cancelled),
                changed = head.wait_for(|&len| len > from) => {
                    if changed.is_err() {
                        // The sender lives in `self`, which this borrow keeps alive.
                        unreachable!("event log watermark closed while the log is alive");
                    }
                }
            }
            if let Some(envelope) = self.poll(from).await {
                return Ok(envelope);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_append_assigns_sequential_indices() {
        let log = EventLog::new();
        assert_eq!(log.append("a").await, 0);
        assert_eq!(log.append("b").await, 1);
        assert_eq!(log.append("c").await, 2);
        assert_eq!(log.len().await, 3);
    }

    #[tokio::test]
    async fn test_poll_returns_none_past_tail() {
        let log = EventLog::new();
        assert!(log.poll(0).await.is_none());
        log.append("a").await;
        assert!(log.poll(0).await.is_some());
        assert!(log.poll(1).await.is_none());
    }

    #[tokio::test]
    async fn test_poll_returns_exactly_the_requested_index() {
        let log = EventLog::new();
        log.push(vec!["a", "b", "c"]).await.unwrap();
        let envelope = log.poll(1).await.unwrap();
        assert_eq!(envelope.index, 1);
        assert_eq!(*envelope.event, "b");
    }

    #[tokio::test]
    async fn test_push_batch_is_contiguous() {
        let log = EventLog::new();
        log.append("x").await;
        let range = log.push(vec!["a", "b", "c"]).await.unwrap();
        assert_eq!(range, 1..4);
        assert_eq!(*log.poll(1).await.unwrap().event, "a");
        assert_eq!(*log.poll(3).await.unwrap().event, "c");
    }

    #[tokio::test]
    async fn test_push_empty_batch_is_a_usage_error() {
        let log = EventLog::<&str>::new();
        assert_eq!(log.push(vec![]).await, Err(PushError::EmptyBatch));
        assert!(log.is_empty().await);
    }

    #[tokio::test]
    async fn test_take_returns_available_event_immediately() {
        let log = EventLog::new();
        log.push(vec!["a", "b"]).await.unwrap();
        let cancel = CancellationToken::new();
        let envelope = log.take(0, &cancel).await.unwrap();
        assert_eq!(envelope.index, 0);
        assert_eq!(*envelope.event, "a");
    }

    #[tokio::test]
    async fn test_take_never_skips_ahead() {
        let log = EventLog::new();
        log.push(vec!["a", "b", "c"]).await.unwrap();
        let cancel = CancellationToken::new();
        // Index 1 is requested while 2 is already available.
        let envelope = log.take(1, &cancel).await.unwrap();
        assert_eq!(envelope.index, 1);
        assert_eq!(*envelope.event, "b");
    }

    #[tokio::test]
    async fn test_take_blocks_until_append() {
        let log = Arc::new(EventLog::new());
        let cancel = CancellationToken::new();

        let reader = {
            let log = Arc::clone(&log);
            let cancel = cancel.clone();
            tokio::spawn(async move { log.take(0, &cancel).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!reader.is_finished());

        log.append("late").await;
        let envelope = reader.await.unwrap().unwrap();
        assert_eq!(envelope.index, 0);
        assert_eq!(*envelope.event, "late");
    }

    #[tokio::test]
    async fn test_take_is_cancellable_while_blocked() {
        let log = Arc::new(EventLog::<&str>::new());
        let cancel = CancellationToken::new();

        let reader = {
            let log = Arc::clone(&log);
            let cancel = cancel.clone();
            tokio::spawn(async move { log.take(0, &cancel).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();
        assert_eq!(reader.await.unwrap().unwrap_err(), TakeError::Cancelled);
    }

    #[tokio::test]
    async fn test_take_prefers_cancellation_over_available_event() {
        let log = EventLog::new();
        log.append("a").await;
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(log.take(0, &cancel).await.unwrap_err(), TakeError::Cancelled);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_assign_unique_gapless_indices() {
        let log = Arc::new(EventLog::new());
        let mut producers = Vec::new();
        for p in 0..8u64 {
            let log = Arc::clone(&log);
            producers.push(tokio::spawn(async move {
                let mut assigned = Vec::new();
                for i in 0..50u64 {
                    assigned.push(log.append(p * 1000 + i).await);
                }
                assigned
            }));
        }

        let mut all = Vec::new();
        for handle in producers {
            all.extend(handle.await.unwrap());
        }
        all.sort_unstable();
        let expected: Vec<u64> = (0..400).collect();
        assert_eq!(all, expected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_batches_never_interleave() {
        let log = Arc::new(EventLog::new());
        let first = {
            let log = Arc::clone(&log);
            tokio::spawn(async move { log.push(vec![1, 2, 3]).await })
        };
        let second = {
            let log = Arc::clone(&log);
            tokio::spawn(async move { log.push(vec![4, 5, 6]).await })
        };
        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();

        assert_eq!(log.len().await, 6);
        // Which batch won the race is unspecified, but each occupies a
        // contiguous index range and keeps its internal order.
        for range in [first, second] {
            let mut previous = None;
            for index in range {
                let envelope = log.poll(index).await.unwrap();
                if let Some(prev) = previous {
                    assert_eq!(*envelope.event, prev + 1);
                }
                previous = Some(*envelope.event);
            }
        }
    }
}
