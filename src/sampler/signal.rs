//! Stop flag shared between the profiler thread and its owner.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How an interruptible wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full timeout passed without a stop request.
    Elapsed,
    /// A stop was requested before or during the wait.
    Stopped,
}

/// A one-way `running -> stopped` flag with a wakeable wait.
///
/// The flag is set at most once and never cleared.
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag and wakes any waiter.
    ///
    /// Returns `true` only for the call that actually flipped the flag.
    pub fn stop(&self) -> bool {
        let mut stopped = self.lock();
        let first = !*stopped;
        *stopped = true;
        self.wake.notify_all();
        first
    }

    pub fn is_stopped(&self) -> bool {
        *self.lock()
    }

    /// Blocks until `timeout` elapses or the flag is set, whichever is first.
    pub fn wait_timeout(&self, timeout: Duration) -> WaitOutcome {
        let guard = self.lock();
        let (stopped, _) = self
            .wake
            .wait_timeout_while(guard, timeout, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            WaitOutcome::Stopped
        } else {
            WaitOutcome::Elapsed
        }
    }

    // A poisoned lock still holds a valid bool.
    fn lock(&self) -> MutexGuard<'_, bool> {
        self.stopped.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
