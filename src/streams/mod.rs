//! Stream facades: the three usage patterns over the core engine.
//!
//! | Facade                | Backing | Replay           | Delivery                      |
//! |-----------------------|---------|------------------|-------------------------------|
//! | [`ReplayableStream`]  | log     | from any offset  | background dispatch loop      |
//! | [`SimpleStream`]      | log     | always offset 0  | background dispatch loop      |
//! | [`SynchronousStream`] | none    | none             | inline, on the pusher's thread|
//!
//! [`PlainStream`] is the payload-only view of a [`ReplayableStream`]
//! (indices stripped, always offset 0).

mod plain;
mod replayable;
mod simple;
mod synchronous;

pub use plain::PlainStream;
pub use replayable::ReplayableStream;
pub use simple::SimpleStream;
pub use synchronous::{SyncSubscription, SynchronousStream};
