//! UART interface trait

use crate::platform::error::{PlatformError, UartError};
use crate::platform::Result;

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baud_rate: 9600 }
    }
}

/// Byte-stream serial port
///
/// # Safety Invariants
///
/// - One owner per port: the modem channel or the GPS driver, never both
pub trait UartInterface {
    /// Write bytes, returning how many were accepted
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the transmitter fails.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read whatever is buffered, up to `buffer.len()` bytes
    ///
    /// Never blocks; returns `Ok(0)` when nothing is available.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` on framing, overrun or driver failure.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Whether at least one byte can be read without blocking
    fn available(&mut self) -> bool;

    /// Block until all written bytes have left the transmitter
    fn flush(&mut self) -> Result<()>;

    /// Write the whole buffer
    ///
    /// # Errors
    ///
    /// Returns `UartError::WriteFailed` if the port stops accepting bytes.
    fn write_all(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            let written = self.write(data)?;
            if written == 0 {
                return Err(PlatformError::Uart(UartError::WriteFailed));
            }
            data = &data[written..];
        }
        Ok(())
    }

    /// Discard everything currently buffered on the receive side
    ///
    /// Returns the number of bytes dropped.
    fn clear_rx(&mut self) -> Result<usize> {
        let mut scratch = [0u8; 64];
        let mut dropped = 0;
        while self.available() {
            let n = self.read(&mut scratch)?;
            if n == 0 {
                break;
            }
            dropped += n;
        }
        Ok(dropped)
    }
}
