//! Driven port for single-shot delayed callbacks.
//!
//! The session manager keeps at most one live handle and cancels it before
//! arming a replacement.

use std::fmt;
use std::time::Duration;

/// Deferred work run when a timer fires.
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled callback.
pub trait TimerHandle: Send + Sync {
    /// Prevent the callback from running. Cancelling a timer that already
    /// fired is a no-op.
    fn cancel(&self);
}

impl fmt::Debug for dyn TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimerHandle")
    }
}

/// Scheduler for single-shot callbacks.
pub trait TimerSource: Send + Sync {
    /// Run `task` once after `delay` unless the returned handle is cancelled.
    fn schedule(&self, delay: Duration, task: TimerTask) -> Box<dyn TimerHandle>;
}
