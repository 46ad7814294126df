//! # Synchronous Fan-out Example
//!
//! Direct, same-thread delivery with no log behind it: callbacks run in
//! registration order on the pusher's thread, and late subscribers miss
//! earlier pushes.
//!
//! ## Run
//! ```bash
//! cargo run --example fanout
//! ```

use replaybus::SynchronousStream;

fn main() {
    let stream = SynchronousStream::new();

    let ui = stream.subscribe(|event: &&str| println!("[ui]    refresh on {event}"));
    stream.subscribe(|event: &&str| println!("[cache] invalidate on {event}"));

    stream.push(&"stream-added");

    // Removing a callback stops its deliveries; the rest are unaffected.
    ui.unsubscribe();
    stream.push(&"stream-removed");

    println!("{} callback(s) still registered", stream.len());
}
