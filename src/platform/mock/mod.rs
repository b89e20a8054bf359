//! Mock platform implementation for testing
//!
//! In-memory implementations of the platform traits, used by unit tests,
//! integration tests and the simulated binary.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! use crash_beacon::platform::mock::MockUart;
//! use crash_beacon::platform::traits::UartInterface;
//!
//! let mut uart = MockUart::new(Default::default());
//! uart.queue_reply(b"\r\nOK\r\n");
//! uart.write_all(b"AT\r\n").unwrap();
//!
//! assert_eq!(uart.tx_buffer(), b"AT\r\n");
//! assert!(uart.available());
//! ```

#![cfg(any(test, feature = "mock"))]

mod gpio;
mod i2c;
mod timer;
mod uart;

pub use gpio::MockGpio;
pub use i2c::{I2cTransaction, MockI2c};
pub use timer::MockTimer;
pub use uart::MockUart;
