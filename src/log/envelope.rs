//! # Envelope: an event paired with its log index.
//!
//! Every read operation on the [`EventLog`](crate::log::EventLog) returns
//! envelopes, never bare payloads. The index is the event's zero-based,
//! gapless position in the log; it is assigned once at append time and never
//! reused.
//!
//! Payloads are held behind an `Arc`, so envelopes are cheap to clone and the
//! payload type does not need to implement `Clone`.

use std::sync::Arc;

/// An event payload together with the index it was assigned at append time.
///
/// Indices within one log instance form the exact sequence `0, 1, 2, …` with
/// no gaps and no duplicates.
#[derive(Debug)]
pub struct Envelope<E> {
    /// Zero-based position of the event in its log.
    pub index: u64,
    /// The application-defined payload.
    pub event: Arc<E>,
}

impl<E> Envelope<E> {
    /// Creates an envelope. Used by the log when assigning indices; consumers
    /// normally only ever receive envelopes, not build them.
    pub fn new(index: u64, event: Arc<E>) -> Self {
        Self { index, event }
    }

    /// Consumes the envelope and returns the payload handle.
    pub fn into_event(self) -> Arc<E> {
        self.event
    }
}

// Manual impl: `#[derive(Clone)]` would require `E: Clone`.
impl<E> Clone for Envelope<E> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            event: Arc::clone(&self.event),
        }
    }
}
