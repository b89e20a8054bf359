//! Motion source trait

use crash_beacon_core::motion::Sample;

use crate::platform::PlatformError;

/// Motion sensor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MotionError {
    /// Bus transaction failed
    #[error("sensor bus error: {0}")]
    Bus(PlatformError),
    /// WHO_AM_I did not match a supported device
    #[error("unexpected device id {0:#04x}")]
    UnknownDevice(u8),
    /// Read attempted before successful initialization
    #[error("sensor not initialized")]
    NotInitialized,
    /// Source cannot produce a sample right now
    #[error("sensor unavailable")]
    Unavailable,
}

impl From<PlatformError> for MotionError {
    fn from(err: PlatformError) -> Self {
        MotionError::Bus(err)
    }
}

/// Six-axis motion source
///
/// One call produces one sample: acceleration in g, angular rate in °/s.
pub trait MotionSource {
    /// Read one sample stamped with `timestamp_us`
    ///
    /// # Errors
    ///
    /// Returns `MotionError` if the sensor cannot be read. The caller decides
    /// whether to substitute a previous sample.
    fn read_sample(&mut self, timestamp_us: u64) -> Result<Sample, MotionError>;

    /// Whether the source is currently producing valid data
    fn is_healthy(&self) -> bool {
        true
    }
}

impl<M: MotionSource + ?Sized> MotionSource for Box<M> {
    fn read_sample(&mut self, timestamp_us: u64) -> Result<Sample, MotionError> {
        (**self).read_sample(timestamp_us)
    }

    fn is_healthy(&self) -> bool {
        (**self).is_healthy()
    }
}
