//! Core traits with std implementations.
//!
//! The trait definitions live in `crash_beacon_core::traits`; this module
//! re-exports them next to the thread-safe implementations used on host.
//!
//! ```text
//!            SharedState<T>            TimeSource
//!          /               \         /            \
//!   MockState<T>       StdState<T>  MockTime   MonotonicClock
//!   (core, tests)      (Mutex)      (core)     (Instant)
//! ```

pub mod sync;
pub mod time;

pub use crash_beacon_core::traits::{MockState, MockTime, SharedState, TimeSource};
pub use sync::StdState;
pub use time::MonotonicClock;
