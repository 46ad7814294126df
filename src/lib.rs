//! # replaybus
//!
//! **Replaybus** is an in-process, append-only event log with independent,
//! replayable subscriptions.
//!
//! Producers push opaque events into a log that assigns each one a gapless,
//! monotonically increasing index. Any number of consumers subscribe, each
//! with its own cursor, background dispatch loop, and cooperative
//! cancellation — none blocks or observes another. A `join()` primitive lets
//! callers synchronize with a subscription's progress without consuming
//! events themselves.
//!
//! ## Architecture
//! ```text
//!  Producers (many)                          Consumers (one loop each)
//!  ────────────────                          ─────────────────────────
//!   push / push_all ──┐                        ┌─► dispatch loop #1 ─► Consume::on_event
//!                     ▼                        │     cursor, token
//!            ┌────────────────┐   wake-up      │
//!            │    EventLog    │───(watch)──────┼─► dispatch loop #2 ─► Consume::on_event
//!            │  0,1,2,… Arc<E>│                │     cursor, token
//!            └────────────────┘                │
//!                     ▲                        └─► dispatch loop #N ─► Consume::on_event
//!          poll (non-blocking)                        │
//!          take (blocking, cancellable)               └─ join() waits for BLOCKED
//! ```
//!
//! The log establishes the single global order at append time; each dispatch
//! loop replays it independently. Events are retained for the life of the
//! process — there is no eviction, durability, or cross-process delivery.
//!
//! ## Facades
//! | Facade                | Use when                                            |
//! |-----------------------|-----------------------------------------------------|
//! | [`ReplayableStream`]  | consumers need history from arbitrary offsets       |
//! | [`SimpleStream`]      | every consumer always wants the full history        |
//! | [`SynchronousStream`] | plain same-thread fan-out, no replay, no tasks      |
//!
//! ## Example
//! ```rust
//! use replaybus::{ConsumeError, ConsumeFn, ConsumerRef, Envelope, ReplayableStream};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stream = ReplayableStream::new();
//!     stream.push("media/added").await;
//!     stream.push("media/identified").await;
//!
//!     let printer: ConsumerRef<&str> =
//!         ConsumeFn::arc("printer", |envelope: Envelope<&'static str>| async move {
//!             println!("#{} {}", envelope.index, envelope.event);
//!             Ok::<_, ConsumeError>(())
//!         });
//!
//!     // Offset 0 replays history, then follows live pushes.
//!     let subscription = stream.subscribe(0, printer);
//!     subscription.join().await?; // both events delivered once this returns
//!     subscription.unsubscribe();
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//! - Per subscription: delivery strictly increasing by index, gapless,
//!   exactly once, regardless of producer interleaving.
//! - `join()` returns only after every event pushed before the call was
//!   delivered.
//! - After `unsubscribe()` takes effect, the consumer is never invoked again.
//! - A consumer error or panic stops only its own subscription.

mod consumers;
mod dispatch;
mod error;
mod log;
mod streams;

// ---- Public re-exports ----

pub use consumers::{Consume, ConsumeError, ConsumeFn, ConsumerRef};
pub use dispatch::{DispatchState, Subscription};
pub use error::{PushError, SubscriptionError, TakeError};
pub use log::{Envelope, EventLog};
pub use streams::{PlainStream, ReplayableStream, SimpleStream, SyncSubscription, SynchronousStream};
