//! `embedded_hal::i2c::I2c` adapter

use embedded_hal::i2c::{ErrorKind, I2c};

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::I2cInterface,
    Result,
};

/// Wraps an `embedded-hal` I2C bus
pub struct HalI2c<B> {
    bus: B,
}

impl<B: I2c> HalI2c<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Release the underlying bus
    pub fn into_inner(self) -> B {
        self.bus
    }
}

fn map_error<E: embedded_hal::i2c::Error>(err: E) -> PlatformError {
    let kind = match err.kind() {
        ErrorKind::NoAcknowledge(_) => I2cError::Nack,
        ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
        _ => I2cError::BusError,
    };
    PlatformError::I2c(kind)
}

impl<B: I2c> I2cInterface for HalI2c<B> {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.bus.write(addr, data).map_err(map_error)
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.bus.read(addr, buffer).map_err(map_error)
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.bus
            .write_read(addr, write_data, read_buffer)
            .map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorType, NoAcknowledgeSource, Operation};

    /// Register file at 0x68; any other address NACKs.
    struct FakeBus {
        registers: [u8; 128],
        pointer: usize,
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> std::result::Result<(), Self::Error> {
            if address != 0x68 {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        self.pointer = bytes[0] as usize;
                        for (offset, value) in bytes[1..].iter().enumerate() {
                            self.registers[self.pointer + offset] = *value;
                        }
                    }
                    Operation::Read(buf) => {
                        for (offset, slot) in buf.iter_mut().enumerate() {
                            *slot = self.registers[self.pointer + offset];
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn register_write_then_read() {
        let mut i2c = HalI2c::new(FakeBus {
            registers: [0; 128],
            pointer: 0,
        });
        i2c.write(0x68, &[0x1C, 0x10]).unwrap();

        let mut value = [0u8; 1];
        i2c.write_read(0x68, &[0x1C], &mut value).unwrap();
        assert_eq!(value, [0x10]);
    }

    #[test]
    fn nack_maps_to_platform_error() {
        let mut i2c = HalI2c::new(FakeBus {
            registers: [0; 128],
            pointer: 0,
        });
        assert_eq!(
            i2c.write(0x50, &[0x00]),
            Err(PlatformError::I2c(I2cError::Nack))
        );
    }
}
