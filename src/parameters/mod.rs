//! Runtime parameters
//!
//! The detector configuration itself is defined in
//! `crash_beacon_core::parameters`. This module adds the host settings
//! around it and loads everything from environment variables.
//!
//! # Variables
//!
//! | Variable               | Unit | Default  |
//! |------------------------|------|----------|
//! | `ACCEL_RANGE`          | g    | 2        |
//! | `GYRO_RANGE`           | °/s  | 250      |
//! | `SAMPLING_RATE`        | Hz   | 50       |
//! | `WINDOW_SIZE`          | -    | 50       |
//! | `CONFIDENCE_THRESHOLD` | -    | 0.7      |
//! | `ALERT_DELAY`          | s    | 15       |
//! | `GPS_STALENESS`        | s    | 300      |
//! | `GPS_POLL_INTERVAL`    | s    | 10       |
//! | `REARM_AFTER`          | s    | manual   |
//! | `PHONE_NUMBER`         | -    | (none)   |
//! | `MODEM_STRICT`         | bool | false    |
//! | `GPS_SOURCE`           | -    | receiver |

pub mod settings;

pub use settings::{GpsSource, Settings, SettingsError};
