//! Platform abstraction layer
//!
//! Drivers talk to buses and pins only through the traits in [`traits`].
//! Two implementations exist: [`mock`] for tests and simulated runs, and
//! [`host`], which adapts any `embedded-hal` / `embedded-io` peripheral.

pub mod error;
pub mod host;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{GpioInterface, I2cInterface, TimerInterface, UartInterface};
