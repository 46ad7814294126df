//! # Subscription: an independent cursor plus its dispatch loop.
//!
//! [`Subscription::start`] spawns one background task per subscription. The
//! task pulls envelopes from the [`EventLog`] in index order and feeds the
//! consumer; the caller keeps the [`Subscription`] handle for
//! [`join`](Subscription::join) and [`unsubscribe`](Subscription::unsubscribe).
//!
//! ## Loop body
//! ```text
//! loop {
//!   cancelled?                ─► Stopped, exit
//!   poll(cursor)
//!     ├─ Some(envelope)       ─► deliver, cursor += 1
//!     └─ None                 ─► state = Blocked{cursor}
//!                                take(cursor, cancel)
//!                                  ├─ Ok(envelope)  ─► state = Running, deliver
//!                                  └─ Cancelled     ─► Stopped, exit
//!   consumer Err / panic      ─► Stopped, exit (logged)
//! }
//! ```
//!
//! ## Guarantees
//! - Delivery is strictly increasing by index, gapless, exactly once.
//! - Subscriptions never block or observe one another; each progresses at its
//!   own offset and speed.
//! - After `unsubscribe()` takes effect no delivery begins; one already in
//!   progress runs to completion.
//! - A cancelled wait observed while the token is *not* cancelled indicates
//!   broken wake-up plumbing and crashes the dispatch task with a diagnostic
//!   instead of being swallowed.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::consumers::ConsumerRef;
use crate::error::{SubscriptionError, TakeError};
use crate::log::{Envelope, EventLog};

use super::DispatchState;

/// Caller-visible control handle for one dispatch loop.
///
/// Dropping the handle does **not** stop the loop; call
/// [`unsubscribe`](Subscription::unsubscribe) first. The handle is the only
/// way to deliver the cancellation signal.
#[must_use = "dropping a Subscription leaks its dispatch loop; call unsubscribe() to stop it"]
pub struct Subscription {
    cancel: CancellationToken,
    state: Arc<watch::Sender<DispatchState>>,
    head: watch::Receiver<u64>,
}

impl Subscription {
    /// Starts a dispatch loop over `log` with its cursor at `from` and
    /// returns the control handle.
    ///
    /// `from` may point anywhere: at or before the tail for replay, past the
    /// tail to receive only future events.
    pub fn start<E>(log: Arc<EventLog<E>>, from: u64, consumer: ConsumerRef<E>) -> Self
    where
        E: Send + Sync + 'static,
    {
        let cancel = CancellationToken::new();
        let (state_tx, _) = watch::channel(DispatchState::Running { cursor: from });
        let state = Arc::new(state_tx);
        let head = log.watermark();

        tokio::spawn(dispatch_loop(
            log,
            from,
            consumer,
            cancel.clone(),
            Arc::clone(&state),
        ));

        Self {
            cancel,
            state,
            head,
        }
    }

    /// Blocks until the dispatch loop has delivered every event that was
    /// available at the moment of this call and is suspended waiting for
    /// more.
    ///
    /// Safe to call repeatedly and from multiple tasks; the caller never
    /// consumes events itself.
    ///
    /// # Errors
    /// [`SubscriptionError::Stopped`] if the subscription has already stopped,
    /// or stops before catching up.
    pub async fn join(&self) -> Result<(), SubscriptionError> {
        let target = *self.head.borrow();
        let mut state = self.state.subscribe();
        if state.borrow().is_stopped() {
            return Err(SubscriptionError::Stopped);
        }

        let caught_up = state
            .wait_for(|s| match *s {
                DispatchState::Blocked { cursor } => cursor >= target,
                DispatchState::Stopped => true,
                DispatchState::Running { .. } => false,
            })
            .await;

        match caught_up {
            Ok(observed) if observed.is_stopped() => Err(SubscriptionError::Stopped),
            Ok(_) => Ok(()),
            // The loop dropped its state sender without publishing Stopped;
            // treat it the same as a stop.
            Err(_) => Err(SubscriptionError::Stopped),
        }
    }

    /// Requests a cooperative stop.
    ///
    /// If the loop is suspended in `take`, the signal wakes it promptly; the
    /// flag is observed at the next safe point and the loop stops without
    /// further deliveries. A delivery already in progress runs to completion.
    ///
    /// Idempotent: repeated calls have no additional effect.
    pub fn unsubscribe(&self) {
        self.cancel.cancel();
    }

    /// Current state of the dispatch loop.
    pub fn state(&self) -> DispatchState {
        *self.state.borrow()
    }

    /// True once the dispatch loop has reached its terminal state.
    pub fn is_stopped(&self) -> bool {
        self.state.borrow().is_stopped()
    }
}

async fn dispatch_loop<E>(
    log: Arc<EventLog<E>>,
    from: u64,
    consumer: ConsumerRef<E>,
    cancel: CancellationToken,
    state: Arc<watch::Sender<DispatchState>>,
) where
    E: Send + Sync + 'static,
{
    tracing::debug!(consumer = consumer.name(), offset = from, "subscription started");
    let mut cursor = from;

    loop {
        if cancel.is_cancelled() {
            break;
        }

        let envelope = match log.poll(cursor).await {
            Some(envelope) => envelope,
            None => {
                state.send_replace(DispatchState::Blocked { cursor });
                match log.take(cursor, &cancel).await {
                    Ok(envelope) => {
                        state.send_replace(DispatchState::Running { cursor });
                        envelope
                    }
                    Err(TakeError::Cancelled) => {
                        // A wake-up that is not a deliberate unsubscribe is a
                        // bug in the cancellation plumbing, not a shutdown.
                        assert!(
                            cancel.is_cancelled(),
                            "dispatch wait for index {cursor} interrupted without unsubscribe"
                        );
                        break;
                    }
                }
            }
        };

        if cancel.is_cancelled() {
            break;
        }
        if !deliver(&consumer, &envelope).await {
            break;
        }
        cursor = envelope.index + 1;
        state.send_replace(DispatchState::Running { cursor });
    }

    state.send_replace(DispatchState::Stopped);
    tracing::debug!(consumer = consumer.name(), cursor, "subscription stopped");
}

/// Feeds one envelope to the consumer. Returns `false` when the subscription
/// must stop (consumer error or panic).
async fn deliver<E>(consumer: &ConsumerRef<E>, envelope: &Envelope<E>) -> bool
where
    E: Send + Sync + 'static,
{
    let fut = consumer.on_event(envelope.clone());
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(())) => true,
        Ok(Err(error)) => {
            tracing::error!(
                consumer = consumer.name(),
                index = envelope.index,
                %error,
                "consumer failed; stopping subscription"
            );
            false
        }
        Err(panic) => {
            tracing::error!(
                consumer = consumer.name(),
                index = envelope.index,
                panic = panic_message(panic.as_ref()),
                "consumer panicked; stopping subscription"
            );
            false
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
