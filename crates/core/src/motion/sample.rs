//! Six-axis motion sample.

use nalgebra::Vector3;

/// Number of scalar features per sample (3 accel + 3 gyro).
pub const FEATURE_COUNT: usize = 6;

/// Magnitude of gravity in sensor units (g).
pub const GRAVITY_G: f32 = 1.0;

/// One reading from the motion sensor.
///
/// Acceleration is in g and angular rate in °/s. Samples are never
/// modified after construction; consumers copy them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Linear acceleration (g)
    pub accel: Vector3<f32>,

    /// Angular rate (°/s)
    pub gyro: Vector3<f32>,

    /// Capture time (µs since start)
    pub timestamp_us: u64,
}

impl Sample {
    /// Create a sample from raw axis arrays.
    pub fn new(accel: [f32; 3], gyro: [f32; 3], timestamp_us: u64) -> Self {
        Self {
            accel: Vector3::from(accel),
            gyro: Vector3::from(gyro),
            timestamp_us,
        }
    }

    /// A stationary, level sensor: gravity on +Z, no rotation.
    pub fn at_rest(timestamp_us: u64) -> Self {
        Self::new([0.0, 0.0, GRAVITY_G], [0.0; 3], timestamp_us)
    }

    /// All-zero sample, used when no reading has ever succeeded.
    pub fn zeroed(timestamp_us: u64) -> Self {
        Self::new([0.0; 3], [0.0; 3], timestamp_us)
    }

    /// Copy of this sample re-stamped with a new timestamp.
    pub fn restamped(&self, timestamp_us: u64) -> Self {
        Self {
            timestamp_us,
            ..*self
        }
    }

    /// Euclidean norm of the acceleration vector (g).
    pub fn accel_magnitude(&self) -> f32 {
        self.accel.norm()
    }

    /// Features in model order: ax, ay, az, gx, gy, gz.
    pub fn features(&self) -> [f32; FEATURE_COUNT] {
        [
            self.accel.x,
            self.accel.y,
            self.accel.z,
            self.gyro.x,
            self.gyro.y,
            self.gyro.z,
        ]
    }
}
