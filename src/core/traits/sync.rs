//! Mutex-backed shared state.

use std::sync::{Mutex, MutexGuard};

use super::SharedState;

/// `SharedState` over `std::sync::Mutex`.
///
/// Safe to share between the sampling loop, the button thread and the
/// delivery worker through an `Arc`. A poisoned lock is recovered: the
/// alert state stays usable even if a holder panicked.
#[derive(Debug, Default)]
pub struct StdState<T> {
    inner: Mutex<T>,
}

impl<T> StdState<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    fn lock(&self) -> MutexGuard<'_, T> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> SharedState<T> for StdState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.lock())
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.lock())
    }
}
