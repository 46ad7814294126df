//! # Core consumer trait
//!
//! `Consume` is the extension point for plugging event handlers into a
//! subscription. Each consumer is driven by its own dispatch loop (see
//! [`Subscription`](crate::Subscription)); deliveries are strictly increasing
//! by index, gapless, and exactly once.
//!
//! ## Contract
//! - `on_event` is awaited to completion before the cursor advances; a slow
//!   consumer delays only its own subscription.
//! - Returning an error stops the owning subscription. It is logged and never
//!   retried; the log and other subscriptions are unaffected.
//! - Panics are caught by the dispatch loop and treated like errors.
//!
//! ## Example (skeleton)
//! ```rust
//! use async_trait::async_trait;
//! use replaybus::{Consume, ConsumeError, Envelope};
//!
//! struct CacheInvalidator;
//!
//! #[async_trait]
//! impl Consume<String> for CacheInvalidator {
//!     async fn on_event(&self, envelope: Envelope<String>) -> Result<(), ConsumeError> {
//!         // drop cached rows derived from envelope.event ...
//!         let _ = envelope;
//!         Ok(())
//!     }
//!     fn name(&self) -> &str {
//!         "cache-invalidator"
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::log::Envelope;

/// Error type a consumer may return to stop its subscription.
pub type ConsumeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shared handle to a consumer.
pub type ConsumerRef<E> = Arc<dyn Consume<E>>;

/// Contract for subscription consumers.
///
/// Called from the subscription's dedicated dispatch task. Implementations
/// should avoid blocking the async runtime (prefer async I/O and cooperative
/// waits).
#[async_trait]
pub trait Consume<E: Send + Sync + 'static>: Send + Sync + 'static {
    /// Handle a single envelope.
    ///
    /// An `Err` stops the owning subscription without further deliveries.
    async fn on_event(&self, envelope: Envelope<E>) -> Result<(), ConsumeError>;

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
