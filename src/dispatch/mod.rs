//! Subscription handles and their dispatch loops.
//!
//! ## Contents
//! - [`DispatchState`] — observable `Running`/`Blocked`/`Stopped` machine
//! - [`Subscription`] — `start`/`join`/`unsubscribe` over one [`EventLog`]
//!
//! One background task runs per active subscription; the log's generation
//! signal wakes blocked loops and the state channel lets `join()` wait for a
//! loop to catch up. See [`log`](crate::log) for the store side.
//!
//! [`EventLog`]: crate::log::EventLog

mod state;
mod subscription;

pub use state::DispatchState;
pub use subscription::Subscription;
