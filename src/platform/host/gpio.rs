//! `embedded_hal::digital` pin adapters

use embedded_hal::digital::{InputPin, OutputPin};

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};

fn pin_fault<E>(_: E) -> PlatformError {
    PlatformError::Gpio(GpioError::PinFault)
}

/// Push-pull output, e.g. the status LED
pub struct HalOutputPin<P> {
    pin: P,
    level: bool,
}

impl<P: OutputPin> HalOutputPin<P> {
    /// Wrap `pin` and drive it low.
    pub fn new(mut pin: P) -> Result<Self> {
        pin.set_low().map_err(pin_fault)?;
        Ok(Self { pin, level: false })
    }
}

impl<P: OutputPin> GpioInterface for HalOutputPin<P> {
    fn set_high(&mut self) -> Result<()> {
        self.pin.set_high().map_err(pin_fault)?;
        self.level = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.pin.set_low().map_err(pin_fault)?;
        self.level = false;
        Ok(())
    }

    fn is_high(&mut self) -> Result<bool> {
        Ok(self.level)
    }

    fn mode(&self) -> GpioMode {
        GpioMode::OutputPushPull
    }
}

/// Pulled-up input, e.g. the cancel button
pub struct HalInputPin<P> {
    pin: P,
}

impl<P: InputPin> HalInputPin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> GpioInterface for HalInputPin<P> {
    fn set_high(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn set_low(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn is_high(&mut self) -> Result<bool> {
        self.pin.is_high().map_err(pin_fault)
    }

    fn mode(&self) -> GpioMode {
        GpioMode::InputPullUp
    }
}
