//! Positioning receivers
//!
//! - `driver`: NMEA 0183 receiver on a UART (GGA and RMC sentences)
//! - `simulated`: Fixed or drifting position for host runs

mod driver;
mod simulated;

pub use driver::GpsDriver;
pub use simulated::SimulatedLocation;
