//! Detector configuration.

use super::error::ConfigError;
use crate::motion::{AccelRange, GyroRange};
use crate::window::MAX_WINDOW_SIZE;

/// What happens after an incident has been sent or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RearmPolicy {
    /// Stay in `Sent`/`Cancelled` until an explicit reset
    #[default]
    Manual,
    /// Return to `Idle` automatically once this many µs have passed
    AfterCooldown { cooldown_us: u64 },
}

/// Complete detector configuration.
///
/// Updates replace the whole value; there are no partial setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    pub accel_range: AccelRange,
    pub gyro_range: GyroRange,
    /// Sampling rate (Hz)
    pub sampling_rate_hz: u32,
    /// Samples per classifier window
    pub window_size: usize,
    /// Confidence above which a window counts as an accident
    pub confidence_threshold: f32,
    /// Countdown between detection and sending (µs)
    pub alert_delay_us: u64,
    /// Maximum age of a usable location fix (µs)
    pub gps_staleness_us: u64,
    /// Period between background location refreshes (µs)
    pub gps_poll_interval_us: u64,
    pub rearm: RearmPolicy,
    /// Consecutive failed sensor reads before a hard fault is raised
    pub sensor_fault_threshold: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            accel_range: AccelRange::G2,
            gyro_range: GyroRange::Dps250,
            sampling_rate_hz: 50,
            window_size: 50,
            confidence_threshold: 0.7,
            alert_delay_us: 15_000_000,
            gps_staleness_us: 300_000_000,
            gps_poll_interval_us: 10_000_000,
            rearm: RearmPolicy::Manual,
            sensor_fault_threshold: 25,
        }
    }
}

impl DetectorConfig {
    /// Sampling period in microseconds.
    pub fn sample_period_us(&self) -> u64 {
        1_000_000 / self.sampling_rate_hz.max(1) as u64
    }

    /// Check every bound.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling_rate_hz == 0 || self.sampling_rate_hz > 1000 {
            return Err(ConfigError::SamplingRate(self.sampling_rate_hz));
        }
        if self.window_size == 0 || self.window_size > MAX_WINDOW_SIZE {
            return Err(ConfigError::WindowSize(self.window_size));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::Threshold(self.confidence_threshold));
        }
        if self.alert_delay_us == 0 {
            return Err(ConfigError::AlertDelay);
        }
        if self.gps_staleness_us == 0 {
            return Err(ConfigError::Staleness);
        }
        if self.gps_poll_interval_us == 0 {
            return Err(ConfigError::PollInterval);
        }
        if self.sensor_fault_threshold == 0 {
            return Err(ConfigError::FaultThreshold);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DetectorConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.sample_period_us(), 20_000);
        assert_eq!(config.alert_delay_us, 15_000_000);
        assert_eq!(config.gps_staleness_us, 300_000_000);
        assert_eq!(config.rearm, RearmPolicy::Manual);
    }

    #[test]
    fn threshold_bounds() {
        let mut config = DetectorConfig::default();
        config.confidence_threshold = 1.0;
        assert!(config.validate().is_ok());
        config.confidence_threshold = 0.0;
        assert!(config.validate().is_ok());
        config.confidence_threshold = 1.01;
        assert_eq!(config.validate(), Err(ConfigError::Threshold(1.01)));
        config.confidence_threshold = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn window_and_rate_bounds() {
        let config = DetectorConfig {
            window_size: MAX_WINDOW_SIZE + 1,
            ..DetectorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::WindowSize(MAX_WINDOW_SIZE + 1))
        );

        let config = DetectorConfig {
            sampling_rate_hz: 0,
            ..DetectorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SamplingRate(0)));
    }

    #[test]
    fn zero_durations_rejected() {
        let config = DetectorConfig {
            alert_delay_us: 0,
            ..DetectorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::AlertDelay));

        let config = DetectorConfig {
            sensor_fault_threshold: 0,
            ..DetectorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::FaultThreshold));
    }
}
