//! One-shot cancel request raised from interrupt or button context.

use core::sync::atomic::{AtomicBool, Ordering};

/// Cancel flag shared with the button handler.
///
/// The handler only ever calls [`request`](Self::request). The detection
/// loop consumes the flag with [`take`](Self::take) and applies it to the
/// state machine under its lock.
#[derive(Debug, Default)]
pub struct CancelSignal {
    requested: AtomicBool,
}

impl CancelSignal {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Raise the flag. Safe to call from any context.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Consume the flag, returning whether it was raised.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}
