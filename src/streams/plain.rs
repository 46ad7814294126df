//! # PlainStream: payload-only view of a replayable log.
//!
//! Obtained via [`ReplayableStream::plain`](crate::ReplayableStream::plain).
//! Subscriptions always start at offset `0` and the consumer receives bare
//! payloads; the index is stripped before delivery.

use std::future::Future;
use std::sync::Arc;

use crate::consumers::{ConsumeError, ConsumeFn, ConsumerRef};
use crate::dispatch::Subscription;
use crate::log::{Envelope, EventLog};

/// Payload-only, full-replay view over a shared [`EventLog`].
pub struct PlainStream<E> {
    log: Arc<EventLog<E>>,
}

impl<E: Send + Sync + 'static> PlainStream<E> {
    pub(crate) fn over(log: Arc<EventLog<E>>) -> Self {
        Self { log }
    }

    /// Starts a full-replay subscription delivering payloads without indices.
    ///
    /// The callback's error contract matches
    /// [`Consume::on_event`](crate::Consume::on_event): an `Err` stops the
    /// subscription.
    pub fn subscribe<F, Fut>(&self, callback: F) -> Subscription
    where
        F: Fn(Arc<E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ConsumeError>> + Send + 'static,
    {
        let consumer: ConsumerRef<E> =
            ConsumeFn::arc("plain", move |envelope: Envelope<E>| callback(envelope.event));
        Subscription::start(Arc::clone(&self.log), 0, consumer)
    }
}

// Manual impl: `#[derive(Clone)]` would require `E: Clone`.
impl<E> Clone for PlainStream<E> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::ReplayableStream;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_plain_view_replays_payloads_from_zero() {
        let stream = ReplayableStream::new();
        stream.push_all(vec!["scan", "identify"]).await.unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = stream.plain().subscribe(move |event: Arc<&str>| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(*event);
                Ok(())
            }
        });
        subscription.join().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["scan", "identify"]);
        subscription.unsubscribe();
    }
}
