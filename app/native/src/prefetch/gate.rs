//! Binary open/closed gate the worker blocks on while paused.

use parking_lot::{Condvar, Mutex};

/// A gate that is either open (threads pass) or closed (threads block).
///
/// Starts open.
#[derive(Debug, Default)]
pub struct PauseGate {
    closed: Mutex<bool>,
    reopened: Condvar,
}

impl PauseGate {
    #[must_use]
    pub const fn new() -> Self { Self { closed: Mutex::new(false), reopened: Condvar::new() } }

    /// Opens the gate and wakes every blocked thread.
    pub fn open(&self) {
        *self.closed.lock() = false;
        self.reopened.notify_all();
    }

    /// Closes the gate. Threads already past it are unaffected.
    pub fn close(&self) { *self.closed.lock() = true; }

    #[must_use]
    pub fn is_open(&self) -> bool { !*self.closed.lock() }

    /// Blocks until the gate is open.
    ///
    /// `on_block` runs once, under the gate lock, only if the caller actually has
    /// to wait. Returns whether the caller waited.
    pub fn pass(&self, on_block: impl FnOnce()) -> bool {
        let mut closed = self.closed.lock();
        if !*closed {
            return false;
        }

        on_block();
        self.reopened.wait_while(&mut closed, |closed| *closed);
        true
    }
}
