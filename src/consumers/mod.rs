//! Event consumers for the subscription layer.
//!
//! This module provides the [`Consume`] trait plus the closure adapter
//! [`ConsumeFn`].
//!
//! ## Delivery flow
//! ```text
//! EventLog ──► dispatch loop (one per Subscription) ──► Consume::on_event
//!                    │
//!                    └── Err / panic from on_event ─► subscription stops
//!                        (logged; log and other subscriptions unaffected)
//! ```

mod consume;
mod consume_fn;

pub use consume::{Consume, ConsumeError, ConsumerRef};
pub use consume_fn::ConsumeFn;
