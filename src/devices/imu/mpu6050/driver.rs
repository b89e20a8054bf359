//! MPU-6050 I2C Driver Implementation

use crash_beacon_core::motion::{AccelRange, GyroRange, Sample, GRAVITY_G};
use nalgebra::Vector3;

use super::registers::{self, TEMP_OFFSET, TEMP_SENSITIVITY};
use crate::devices::traits::{MotionError, MotionSource};
use crate::platform::{I2cInterface, TimerInterface};

/// Maximum consecutive errors before marking sensor unhealthy
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mpu6050Config {
    /// I2C address (0x68 or 0x69)
    pub address: u8,
    /// Accelerometer full-scale range
    pub accel_range: AccelRange,
    /// Gyroscope full-scale range
    pub gyro_range: GyroRange,
    /// Output data rate (Hz); converted to SMPLRT_DIV
    pub sample_rate_hz: u32,
}

impl Default for Mpu6050Config {
    fn default() -> Self {
        Self {
            address: registers::MPU6050_ADDR,
            accel_range: AccelRange::G2,
            gyro_range: GyroRange::Dps250,
            sample_rate_hz: 50,
        }
    }
}

impl Mpu6050Config {
    /// Sample rate divider for the configured output rate
    pub fn sample_rate_div(&self) -> u8 {
        let rate = self.sample_rate_hz.clamp(4, registers::INTERNAL_RATE_HZ);
        (registers::INTERNAL_RATE_HZ / rate - 1) as u8
    }
}

/// Static offsets subtracted from every reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Calibration {
    /// Accelerometer offset (g)
    pub accel_offset: Vector3<f32>,
    /// Gyroscope offset (°/s)
    pub gyro_offset: Vector3<f32>,
}

/// Raw register counts from one burst read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawReading {
    pub accel: [i16; 3],
    pub temperature: i16,
    pub gyro: [i16; 3],
}

impl RawReading {
    /// Parse the 14-byte ACCEL_XOUT_H.. burst (big-endian)
    pub fn from_bytes(buf: &[u8; registers::MEASUREMENT_LEN]) -> Self {
        let word = |i: usize| i16::from_be_bytes([buf[i], buf[i + 1]]);
        Self {
            accel: [word(0), word(2), word(4)],
            temperature: word(6),
            gyro: [word(8), word(10), word(12)],
        }
    }

    /// Die temperature (°C)
    pub fn temperature_c(&self) -> f32 {
        self.temperature as f32 / TEMP_SENSITIVITY + TEMP_OFFSET
    }
}

/// MPU-6050 / MPU-6500 / MPU-9250 I2C driver
///
/// Only the accelerometer and gyroscope are used. Register-compatible
/// parts are accepted at the WHO_AM_I check.
pub struct Mpu6050<I: I2cInterface, T: TimerInterface> {
    /// I2C bus handle
    i2c: I,

    /// Delay provider for reset and calibration
    timer: T,

    /// Driver configuration
    config: Mpu6050Config,

    /// Calibration data
    calibration: Calibration,

    /// Health status
    healthy: bool,

    /// Consecutive error count
    error_count: u32,

    /// Initialization complete flag
    initialized: bool,
}

impl<I: I2cInterface, T: TimerInterface> Mpu6050<I, T> {
    /// Create and initialize a new driver
    ///
    /// # Errors
    ///
    /// Returns `MotionError::UnknownDevice` if WHO_AM_I does not match, or
    /// `MotionError::Bus` if any configuration write fails.
    pub fn new(i2c: I, timer: T, config: Mpu6050Config) -> Result<Self, MotionError> {
        let mut driver = Self {
            i2c,
            timer,
            config,
            calibration: Calibration::default(),
            healthy: false,
            error_count: 0,
            initialized: false,
        };

        driver.init()?;
        Ok(driver)
    }

    fn init(&mut self) -> Result<(), MotionError> {
        let whoami = self.read_register(registers::WHO_AM_I)?;
        let device_name = match whoami {
            registers::MPU6050_WHO_AM_I_VALUE => "MPU-6050",
            registers::MPU6500_WHO_AM_I_VALUE => "MPU-6500",
            registers::MPU9250_WHO_AM_I_VALUE => "MPU-9250",
            registers::MPU9255_WHO_AM_I_VALUE => "MPU-9255",
            _ => {
                crate::log_error!(
                    "Unknown IMU WHO_AM_I: {:#x} (expected 0x68, 0x70, 0x71, or 0x73)",
                    whoami
                );
                return Err(MotionError::UnknownDevice(whoami));
            }
        };
        crate::log_info!("{} detected (WHO_AM_I: {:#x})", device_name, whoami);

        self.write_register(registers::PWR_MGMT_1, registers::PWR_MGMT_1_H_RESET)?;
        self.timer.delay_ms(100)?;

        self.write_register(registers::PWR_MGMT_1, registers::PWR_MGMT_1_CLKSEL_PLL_X)?;
        self.timer.delay_ms(10)?;

        self.write_register(registers::SMPLRT_DIV, self.config.sample_rate_div())?;
        self.write_register(registers::CONFIG, registers::DLPF_CFG_42HZ)?;
        self.write_register(registers::GYRO_CONFIG, self.config.gyro_range.register_value())?;
        self.write_register(registers::ACCEL_CONFIG, self.config.accel_range.register_value())?;

        self.initialized = true;
        self.healthy = true;
        crate::log_info!(
            "{} initialized: ±{}g, ±{}°/s, {} Hz",
            device_name,
            self.config.accel_range.full_scale(),
            self.config.gyro_range.full_scale(),
            self.config.sample_rate_hz
        );

        Ok(())
    }

    /// Driver configuration
    pub fn config(&self) -> &Mpu6050Config {
        &self.config
    }

    /// Current calibration offsets
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Replace calibration offsets
    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.calibration = calibration;
    }

    /// Read one burst of raw counts
    pub fn read_raw(&mut self) -> Result<RawReading, MotionError> {
        if !self.initialized {
            return Err(MotionError::NotInitialized);
        }

        let mut buf = [0u8; registers::MEASUREMENT_LEN];
        let result = self
            .i2c
            .write_read(self.config.address, &[registers::ACCEL_XOUT_H], &mut buf);

        match result {
            Ok(()) => {
                if self.error_count > 0 {
                    crate::log_info!(
                        "IMU recovered after {} failed reads",
                        self.error_count
                    );
                }
                self.error_count = 0;
                self.healthy = true;
                Ok(RawReading::from_bytes(&buf))
            }
            Err(err) => {
                self.error_count += 1;
                if self.error_count >= MAX_CONSECUTIVE_ERRORS && self.healthy {
                    crate::log_error!(
                        "IMU marked unhealthy after {} consecutive errors",
                        self.error_count
                    );
                    self.healthy = false;
                }
                Err(MotionError::Bus(err))
            }
        }
    }

    /// Convert raw counts to physical units, without calibration
    pub fn convert(&self, raw: &RawReading, timestamp_us: u64) -> Sample {
        let accel = raw.accel.map(|v| self.config.accel_range.to_g(v));
        let gyro = raw.gyro.map(|v| self.config.gyro_range.to_dps(v));
        Sample::new(accel, gyro, timestamp_us)
    }

    /// Average `samples` still readings and store the resulting offsets
    ///
    /// The sensor must lie flat and motionless, Z axis up: one g is removed
    /// from the Z accelerometer offset.
    ///
    /// # Errors
    ///
    /// Fails on the first bus error; previous calibration is kept.
    pub fn calibrate(&mut self, samples: u32, interval_ms: u32) -> Result<Calibration, MotionError> {
        let count = samples.max(1);
        crate::log_info!("Calibrating IMU over {} samples, keep the sensor still", count);

        let mut accel_sum = Vector3::zeros();
        let mut gyro_sum = Vector3::zeros();
        for _ in 0..count {
            let raw = self.read_raw()?;
            let sample = self.convert(&raw, 0);
            accel_sum += sample.accel;
            gyro_sum += sample.gyro;
            self.timer.delay_ms(interval_ms)?;
        }

        let n = count as f32;
        let mut accel_offset = accel_sum / n;
        accel_offset.z -= GRAVITY_G;
        let calibration = Calibration {
            accel_offset,
            gyro_offset: gyro_sum / n,
        };
        self.calibration = calibration;

        crate::log_info!(
            "IMU calibrated: accel offset [{:.4}, {:.4}, {:.4}] g, gyro offset [{:.3}, {:.3}, {:.3}] °/s",
            accel_offset.x,
            accel_offset.y,
            accel_offset.z,
            calibration.gyro_offset.x,
            calibration.gyro_offset.y,
            calibration.gyro_offset.z
        );
        Ok(calibration)
    }

    /// Borrow the bus, e.g. to share it with another device
    pub fn bus_mut(&mut self) -> &mut I {
        &mut self.i2c
    }

    /// Release the bus and timer
    pub fn release(self) -> (I, T) {
        (self.i2c, self.timer)
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, MotionError> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.config.address, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), MotionError> {
        self.i2c.write(self.config.address, &[reg, value])?;
        Ok(())
    }
}

impl<I: I2cInterface, T: TimerInterface> MotionSource for Mpu6050<I, T> {
    fn read_sample(&mut self, timestamp_us: u64) -> Result<Sample, MotionError> {
        let raw = self.read_raw()?;
        let sample = self.convert(&raw, timestamp_us);
        Ok(Sample {
            accel: sample.accel - self.calibration.accel_offset,
            gyro: sample.gyro - self.calibration.gyro_offset,
            timestamp_us,
        })
    }

    fn is_healthy(&self) -> bool {
        self.healthy
    }
}
