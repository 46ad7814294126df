//! # Function-backed consumer (`ConsumeFn`)
//!
//! [`ConsumeFn`] wraps a closure `F: Fn(Envelope<E>) -> Fut`, producing a
//! fresh future per delivery. This avoids shared mutable state in the common
//! case; when a consumer does need state across deliveries, hold it in an
//! `Arc<...>` captured by the closure.
//!
//! ## Example
//! ```rust
//! use replaybus::{ConsumeError, ConsumeFn, ConsumerRef, Envelope};
//!
//! let printer: ConsumerRef<String> = ConsumeFn::arc("printer", |envelope: Envelope<String>| async move {
//!     println!("#{} {}", envelope.index, envelope.event);
//!     Ok::<_, ConsumeError>(())
//! });
//!
//! assert_eq!(printer.name(), "printer");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::log::Envelope;

use super::{Consume, ConsumeError};

/// Function-backed consumer implementation.
///
/// Wraps a closure that *creates* a new future per delivered envelope.
#[derive(Debug)]
pub struct ConsumeFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ConsumeFn<F> {
    /// Creates a new function-backed consumer.
    ///
    /// Prefer [`ConsumeFn::arc`] when you immediately need a
    /// [`ConsumerRef`](crate::ConsumerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the consumer and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<E, F, Fut> Consume<E> for ConsumeFn<F>
where
    E: Send + Sync + 'static,
    F: Fn(Envelope<E>) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), ConsumeError>> + Send + 'static,
{
    async fn on_event(&self, envelope: Envelope<E>) -> Result<(), ConsumeError> {
        (self.f)(envelope).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
