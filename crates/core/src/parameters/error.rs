//! Configuration error types

use crate::motion::RangeError;

/// A configuration value outside its accepted bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Sensor full-scale range not supported
    Range(RangeError),
    /// Sampling rate must be 1..=1000 Hz
    SamplingRate(u32),
    /// Window size must be 1..=MAX_WINDOW_SIZE
    WindowSize(usize),
    /// Confidence threshold must lie in [0, 1]
    Threshold(f32),
    /// Alert delay must be non-zero
    AlertDelay,
    /// Staleness bound must be non-zero
    Staleness,
    /// Location poll interval must be non-zero
    PollInterval,
    /// Sensor fault threshold must be non-zero
    FaultThreshold,
    /// Window size differs from the loaded model's input length
    WindowMismatch { window: usize, model: usize },
}

impl From<RangeError> for ConfigError {
    fn from(err: RangeError) -> Self {
        ConfigError::Range(err)
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Range(err) => write!(f, "{}", err),
            ConfigError::SamplingRate(hz) => write!(f, "sampling rate {} Hz out of range", hz),
            ConfigError::WindowSize(n) => write!(f, "window size {} out of range", n),
            ConfigError::Threshold(t) => write!(f, "threshold {} not in [0, 1]", t),
            ConfigError::AlertDelay => write!(f, "alert delay must be non-zero"),
            ConfigError::Staleness => write!(f, "location staleness bound must be non-zero"),
            ConfigError::PollInterval => write!(f, "location poll interval must be non-zero"),
            ConfigError::FaultThreshold => write!(f, "sensor fault threshold must be non-zero"),
            ConfigError::WindowMismatch { window, model } => write!(
                f,
                "window size {} does not match model input length {}",
                window, model
            ),
        }
    }
}
