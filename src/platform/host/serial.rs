//! `embedded-io` serial adapter

use embedded_io::{Read, ReadReady, Write};

use crate::platform::{
    error::{PlatformError, UartError},
    traits::UartInterface,
    Result,
};

/// Wraps any `embedded-io` byte stream that can report read readiness
pub struct IoUart<P> {
    port: P,
}

impl<P> IoUart<P>
where
    P: Read + Write + ReadReady,
{
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn into_inner(self) -> P {
        self.port
    }
}

impl<P> UartInterface for IoUart<P>
where
    P: Read + Write + ReadReady,
{
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.port
            .write(data)
            .map_err(|_| PlatformError::Uart(UartError::WriteFailed))
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        if !self.available() {
            return Ok(0);
        }
        self.port
            .read(buffer)
            .map_err(|_| PlatformError::Uart(UartError::ReadFailed))
    }

    fn available(&mut self) -> bool {
        self.port.read_ready().unwrap_or(false)
    }

    fn flush(&mut self) -> Result<()> {
        self.port
            .flush()
            .map_err(|_| PlatformError::Uart(UartError::WriteFailed))
    }
}
