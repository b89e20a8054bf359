//! Platform error types
//!
//! Adapters map HAL-specific failures onto these. Timers have no failure
//! mode of their own; `TimerInterface` keeps a `Result` so a bus-backed
//! clock can still report a bus error.

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

/// A failed bus or pin operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("UART: {0}")]
    Uart(UartError),
    #[error("I2C: {0}")]
    I2c(I2cError),
    #[error("GPIO: {0}")]
    Gpio(GpioError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UartError {
    /// Transmitter refused or lost bytes
    #[error("write failed")]
    WriteFailed,
    /// Receiver reported framing, overrun or driver failure
    #[error("read failed")]
    ReadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum I2cError {
    #[error("bus error")]
    BusError,
    /// Device did not acknowledge its address or data
    #[error("no acknowledge")]
    Nack,
    #[error("arbitration lost")]
    ArbitrationLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GpioError {
    /// Output operation on an input pin, or the reverse
    #[error("invalid pin mode")]
    InvalidMode,
    #[error("pin driver fault")]
    PinFault,
}
