//! Error types used by the event log and the subscription layer.
//!
//! This module defines three error enums:
//!
//! - [`PushError`] — usage errors raised by producers.
//! - [`TakeError`] — outcomes of a blocking read other than delivery.
//! - [`SubscriptionError`] — usage errors raised by subscription handles.
//!
//! All types provide an `as_label` helper producing short stable snake_case
//! labels for logs and metrics.

use thiserror::Error;

/// # Errors raised by producer-facing operations.
///
/// These represent misuse of the append API rather than runtime failures;
/// a well-behaved producer never sees them.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PushError {
    /// A batch push was called with no events.
    #[error("push requires at least one event")]
    EmptyBatch,
}

impl PushError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use replaybus::PushError;
    ///
    /// assert_eq!(PushError::EmptyBatch.as_label(), "push_empty_batch");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PushError::EmptyBatch => "push_empty_batch",
        }
    }
}

/// # Outcomes of a blocking `take` other than successful delivery.
///
/// A cancelled wait is a normal, caller-requested outcome. It is reported as
/// an error variant so it composes with `?`, but it carries no failure state.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TakeError {
    /// The wait was cancelled through the caller's [`CancellationToken`]
    /// before the requested index became available.
    ///
    /// [`CancellationToken`]: tokio_util::sync::CancellationToken
    #[error("wait cancelled before the event became available")]
    Cancelled,
}

impl TakeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use replaybus::TakeError;
    ///
    /// assert_eq!(TakeError::Cancelled.as_label(), "take_cancelled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TakeError::Cancelled => "take_cancelled",
        }
    }
}

/// # Errors raised by [`Subscription`](crate::Subscription) handles.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The subscription has already stopped (unsubscribed, or its consumer
    /// failed) and can no longer be joined.
    #[error("subscription already stopped")]
    Stopped,
}

impl SubscriptionError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use replaybus::SubscriptionError;
    ///
    /// assert_eq!(SubscriptionError::Stopped.as_label(), "subscription_stopped");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscriptionError::Stopped => "subscription_stopped",
        }
    }
}
