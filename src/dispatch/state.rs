//! # Dispatch loop state machine.
//!
//! Each subscription publishes its current state through a `watch` channel so
//! that [`join()`](crate::Subscription::join) can wait on progress without
//! sharing a synchronization object with the log's wake-up signal.
//!
//! ```text
//!        poll hit                   poll miss
//! Running ──────► Running        Running ──────► Blocked ──(take ok)──► Running
//!
//! unsubscribe / consumer failure / consumer panic ──► Stopped (terminal)
//! ```

/// Observable state of one dispatch loop.
///
/// `cursor` is the next index the loop will deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// The loop is delivering immediately-available events.
    Running {
        /// Next index to deliver.
        cursor: u64,
    },
    /// The loop is suspended in `take`, waiting for `cursor` to be appended.
    /// Everything below `cursor` has been delivered.
    Blocked {
        /// Index being waited for.
        cursor: u64,
    },
    /// Terminal: the loop exited and will never invoke the consumer again.
    Stopped,
}

impl DispatchState {
    /// True for the terminal state.
    pub fn is_stopped(&self) -> bool {
        matches!(self, DispatchState::Stopped)
    }

    /// The loop's cursor, if it is still alive.
    pub fn cursor(&self) -> Option<u64> {
        match *self {
            DispatchState::Running { cursor } | DispatchState::Blocked { cursor } => Some(cursor),
            DispatchState::Stopped => None,
        }
    }
}
