//! Append-only event log: the data model and the store.
//!
//! ## Contents
//! - [`Envelope`] — `(index, event)` pair returned by every read operation
//! - [`EventLog`] — the ordered sequence with `append`/`push`/`poll`/`take`
//!
//! The log establishes the single global order of events at append time;
//! consumers layered on top (see [`dispatch`](crate::dispatch)) each keep an
//! independent cursor into it.

mod envelope;
mod store;

pub use envelope::Envelope;
pub use store::EventLog;
