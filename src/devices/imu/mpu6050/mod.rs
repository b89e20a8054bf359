//! MPU-6050 6-axis IMU driver

mod driver;
pub mod registers;

pub use driver::{Calibration, Mpu6050, Mpu6050Config, RawReading};
