//! I2C interface trait
//!
//! This module defines the I2C bus communication interface that platform implementations must provide.

use crate::platform::Result;

/// I2C interface trait
///
/// # Safety Invariants
///
/// - Only one owner per I2C bus instance
/// - Address must be 7-bit (valid range: 0x00..=0x7F)
pub trait I2cInterface {
    /// Write data to I2C device
    ///
    /// Performs a complete I2C write transaction:
    /// START - ADDR(W) - DATA - STOP
    ///
    /// # Arguments
    ///
    /// * `addr` - 7-bit I2C device address
    /// * `data` - Data bytes to write
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if:
    /// - Device does not acknowledge (NACK)
    /// - Bus error occurs
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()>;

    /// Read data from I2C device
    ///
    /// Performs a complete I2C read transaction:
    /// START - ADDR(R) - DATA - STOP
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` on NACK, bus error or lost arbitration.
    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()>;

    /// Write then read with a repeated start
    ///
    /// Used for register reads: the register address is written, then
    /// `read_buffer.len()` bytes are read back.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` on NACK, bus error or lost arbitration.
    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()>;
}
