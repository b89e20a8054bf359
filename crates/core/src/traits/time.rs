//! Time abstraction for platform-agnostic timing.
//!
//! The detection loop, the button debouncer and the alert countdown all
//! read time through `TimeSource` so that host tests can drive the clock.

use core::sync::atomic::{AtomicU64, Ordering};

/// Platform-agnostic monotonic time source.
///
/// # Example
///
/// ```
/// use crash_beacon_core::traits::{MockTime, TimeSource};
///
/// fn window_elapsed<T: TimeSource>(time: &T, started_us: u64) -> bool {
///     time.elapsed_since(started_us) >= 15_000_000
/// }
///
/// let time = MockTime::new();
/// time.advance(16_000_000);
/// assert!(window_elapsed(&time, 0));
/// ```
pub trait TimeSource: Send + Sync {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction to handle potential overflow.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source with manual advancement.
///
/// Cloning copies the current reading; clones advance independently.
#[derive(Default)]
pub struct MockTime {
    current_us: AtomicU64,
}

impl Clone for MockTime {
    fn clone(&self) -> Self {
        Self::with_initial(self.now_us())
    }
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self::with_initial(0)
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: AtomicU64::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.store(us, Ordering::SeqCst);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.fetch_add(us, Ordering::SeqCst);
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
