//! Device drivers
//!
//! Drivers are written against the platform traits, so the same code runs
//! on real buses and on mocks. Each capability also has a simulated
//! variant, selected at construction time.
//!
//! ## Modules
//!
//! - `traits`: Capability interfaces (`MotionSource`, `LocationSource`)
//! - `imu`: MPU-6050 driver and simulated motion
//! - `gps`: NMEA receiver driver and simulated location
//! - `modem`: SIM7000 AT driver and simulated modem

pub mod gps;
pub mod imu;
pub mod modem;
pub mod traits;
