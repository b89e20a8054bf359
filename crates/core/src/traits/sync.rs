//! Synchronized state abstraction for state shared between contexts.
//!
//! The alert state machine is touched by the detection loop, the cancel
//! button and the delivery worker. All of them go through `SharedState` so
//! each transition is applied under a single lock.

/// Platform-agnostic synchronized state access.
///
/// Implementations:
/// - `StdState<T>` (host crate) backed by `std::sync::Mutex`
/// - `MockState<T>` for single-threaded tests using `RefCell`
///
/// # Example
///
/// ```
/// use crash_beacon_core::traits::{MockState, SharedState};
///
/// struct Counter {
///     value: u32,
/// }
///
/// fn increment<S: SharedState<Counter>>(state: &S) -> u32 {
///     state.with_mut(|counter| {
///         counter.value += 1;
///         counter.value
///     })
/// }
///
/// let state = MockState::new(Counter { value: 0 });
/// assert_eq!(increment(&state), 1);
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    ///
    /// The closure runs with exclusive access; every read-modify-write done
    /// inside it is atomic with respect to other users of the state.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock synchronized state using RefCell for single-threaded testing.
///
/// # Panics
///
/// Panics if borrowing rules are violated (e.g., calling `with_mut` while
/// `with` is active). This indicates a bug in the test code.
pub struct MockState<T> {
    inner: core::cell::RefCell<T>,
}

impl<T> MockState<T> {
    /// Creates a new `MockState` wrapping the given value.
    pub fn new(value: T) -> Self {
        Self {
            inner: core::cell::RefCell::new(value),
        }
    }
}

impl<T> SharedState<T> for MockState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.borrow())
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.inner.borrow_mut())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
