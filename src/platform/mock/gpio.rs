//! Mock GPIO implementation for testing

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};

/// Mock GPIO implementation
///
/// Tracks pin level and mode, and counts output transitions.
#[derive(Debug)]
pub struct MockGpio {
    level: bool,
    mode: GpioMode,
    transitions: u32,
}

impl MockGpio {
    /// Create a new mock GPIO in output mode, driven low
    pub fn new_output() -> Self {
        Self {
            level: false,
            mode: GpioMode::OutputPushPull,
            transitions: 0,
        }
    }

    /// Create a new pulled-up input (reads high when released)
    pub fn new_input_pull_up() -> Self {
        Self {
            level: true,
            mode: GpioMode::InputPullUp,
            transitions: 0,
        }
    }

    /// Set the input level (for simulating external signals)
    pub fn set_input_state(&mut self, high: bool) {
        self.level = high;
    }

    /// Current level without going through the trait
    pub fn level(&self) -> bool {
        self.level
    }

    /// Number of output level changes
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    fn drive(&mut self, high: bool) -> Result<()> {
        if !self.mode.is_output() {
            return Err(PlatformError::Gpio(GpioError::InvalidMode));
        }
        if self.level != high {
            self.transitions += 1;
        }
        self.level = high;
        Ok(())
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        self.drive(true)
    }

    fn set_low(&mut self) -> Result<()> {
        self.drive(false)
    }

    fn is_high(&mut self) -> Result<bool> {
        Ok(self.level)
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}
