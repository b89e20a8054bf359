//! Simulated location source

use crash_beacon_core::location::LocationFix;

use crate::devices::traits::LocationSource;

/// Position that becomes available after a cold-start delay
///
/// The fix can be dropped at runtime to exercise the "location unknown"
/// path.
#[derive(Debug, Clone)]
pub struct SimulatedLocation {
    latitude: f64,
    longitude: f64,
    acquire_after_us: u64,
    signal_lost: bool,
    last_fix: Option<LocationFix>,
}

impl SimulatedLocation {
    /// Position available immediately
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            acquire_after_us: 0,
            signal_lost: false,
            last_fix: None,
        }
    }

    /// Delay before the first fix
    pub fn with_acquisition_delay(mut self, delay_us: u64) -> Self {
        self.acquire_after_us = delay_us;
        self
    }

    /// Stop (or resume) producing new fixes; the last one is still reported
    pub fn set_signal_lost(&mut self, lost: bool) {
        self.signal_lost = lost;
    }
}

impl LocationSource for SimulatedLocation {
    fn poll(&mut self, now_us: u64) -> Option<LocationFix> {
        if !self.signal_lost && now_us >= self.acquire_after_us {
            self.last_fix = Some(LocationFix::new(self.latitude, self.longitude, now_us));
        }
        self.last_fix
    }
}
