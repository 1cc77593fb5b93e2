//! Tokio-backed single-shot timers.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::domain::ports::{TimerHandle, TimerSource, TimerTask};

/// Timer source spawning one sleeping task per scheduled callback.
#[derive(Debug, Clone)]
pub struct TokioTimerSource {
    runtime: Handle,
}

impl TokioTimerSource {
    /// Timer source bound to the runtime that is current when called.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Timer source spawning onto `runtime`.
    #[must_use]
    pub const fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

struct TokioTimerHandle(AbortHandle);

impl TimerHandle for TokioTimerHandle {
    fn cancel(&self) {
        self.0.abort();
    }
}

impl TimerSource for TokioTimerSource {
    fn schedule(&self, delay: Duration, task: TimerTask) -> Box<dyn TimerHandle> {
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        Box::new(TokioTimerHandle(join.abort_handle()))
    }
}
