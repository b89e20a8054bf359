//! Logging abstraction
//!
//! Crate code logs through the `log_*!` macros so the backend can change
//! without touching call sites. On host the macros forward to `tracing`;
//! binaries call [`init`] once to install a formatting subscriber.
//!
//! The level filter comes from `RUST_LOG` and falls back to the default
//! passed to [`init`].

use tracing_subscriber::{fmt, EnvFilter};

#[doc(hidden)]
pub use tracing as __tracing;

/// Install the global fmt subscriber.
///
/// Returns `false` if a subscriber was already installed (e.g. by a test
/// harness); logging then goes to that subscriber.
pub fn init(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::core::logging::__tracing::info!($($arg)*)
    };
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::core::logging::__tracing::warn!($($arg)*)
    };
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::core::logging::__tracing::error!($($arg)*)
    };
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::core::logging::__tracing::debug!($($arg)*)
    };
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::core::logging::__tracing::trace!($($arg)*)
    };
}
