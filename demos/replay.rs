//! # Replayable Stream Example
//!
//! Two consumers over one log:
//! - a full-history consumer starting at offset 0
//! - a live-only consumer starting at the current tail
//!
//! Shows `join()` catching up with delivery and `unsubscribe()` stopping one
//! consumer without affecting the other.
//!
//! ## Run
//! ```bash
//! cargo run --example replay
//! ```

use replaybus::{ConsumeError, ConsumeFn, ConsumerRef, Envelope, ReplayableStream};

fn printer(tag: &'static str) -> ConsumerRef<String> {
    ConsumeFn::arc(tag, move |envelope: Envelope<String>| async move {
        println!("[{tag}] #{} {}", envelope.index, envelope.event);
        Ok::<_, ConsumeError>(())
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "replaybus=debug".into()),
        )
        .init();

    let stream = ReplayableStream::new();
    stream
        .push_all(vec![
            "library/scan-started".to_string(),
            "library/file-found".to_string(),
            "library/scan-finished".to_string(),
        ])
        .await?;

    // Replays the three historical events, then follows live pushes.
    let history = stream.subscribe(0, printer("history"));
    history.join().await?;

    // Starts past the tail: sees only what comes next.
    let live = stream.subscribe(stream.len().await, printer("live"));

    stream.push("metadata/identified".to_string()).await;
    history.join().await?;
    live.join().await?;

    history.unsubscribe();
    stream.push("cache/invalidated".to_string()).await;
    live.join().await?; // only [live] printed this one

    live.unsubscribe();
    Ok(())
}
