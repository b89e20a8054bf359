//! IMU drivers
//!
//! ## Available Drivers
//!
//! - `mpu6050`: MPU-6050 (and register-compatible MPU-6500/9250/9255) over I2C
//! - `simulated`: Scripted motion for host runs and tests

pub mod mpu6050;
pub mod simulated;

pub use mpu6050::{Calibration, Mpu6050, Mpu6050Config};
pub use simulated::{ImpactProfile, SimulatedMotion};
