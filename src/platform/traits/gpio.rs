//! GPIO interface trait
//!
//! The detector uses two pins: the status indicator (output) and the
//! cancel button (pulled-up input, active low).

use crate::platform::Result;

/// GPIO pin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioMode {
    /// Input mode (high impedance)
    Input,
    /// Input mode with pull-up resistor
    InputPullUp,
    /// Output mode (push-pull)
    OutputPushPull,
}

impl GpioMode {
    pub fn is_output(self) -> bool {
        matches!(self, GpioMode::OutputPushPull)
    }
}

/// GPIO interface trait
///
/// # Safety Invariants
///
/// - Only one owner per GPIO pin instance
pub trait GpioInterface {
    /// Drive the pin high
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin
    /// is not configured as an output.
    fn set_high(&mut self) -> Result<()>;

    /// Drive the pin low
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin
    /// is not configured as an output.
    fn set_low(&mut self) -> Result<()>;

    /// Sample the pin level
    ///
    /// Valid in both input and output modes. Takes `&mut self` because
    /// some HAL input pins need exclusive access to read.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::PinFault)` if the driver fails.
    fn is_high(&mut self) -> Result<bool>;

    /// Drive the pin to `high`
    fn set_level(&mut self, high: bool) -> Result<()> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }

    /// Configured pin mode
    fn mode(&self) -> GpioMode;
}
