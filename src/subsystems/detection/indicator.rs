//! Status indicator output

use crash_beacon_core::alert::AlertState;

use crate::platform::{GpioInterface, Result};

/// Single binary output, lit while an alert countdown is pending
pub struct StatusIndicator {
    pin: Box<dyn GpioInterface + Send>,
    lit: bool,
}

impl StatusIndicator {
    /// Take ownership of an output pin and drive it low
    pub fn new(mut pin: Box<dyn GpioInterface + Send>) -> Result<Self> {
        pin.set_low()?;
        Ok(Self { pin, lit: false })
    }

    /// Drive the output from the alert state
    ///
    /// Returns `true` if the output changed.
    pub fn show(&mut self, state: &AlertState) -> Result<bool> {
        let on = state.indicator_on();
        if on == self.lit {
            return Ok(false);
        }
        self.pin.set_level(on)?;
        self.lit = on;
        crate::log_debug!("Status indicator {}", if on { "on" } else { "off" });
        Ok(true)
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Read back the pin level
    pub fn pin_level(&mut self) -> Result<bool> {
        self.pin.is_high()
    }
}
