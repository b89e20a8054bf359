//! Host platform implementation
//!
//! Adapters from the `embedded-hal` 1.0 and `embedded-io` traits onto the
//! platform traits, plus a std timer. Any HAL that implements the
//! ecosystem traits (Linux `/dev/i2c-*`, USB serial bridges, MCU HALs)
//! plugs in here without touching the drivers.

mod gpio;
mod i2c;
mod serial;
mod timer;

pub use gpio::{HalInputPin, HalOutputPin};
pub use i2c::HalI2c;
pub use serial::IoUart;
pub use timer::StdTimer;
