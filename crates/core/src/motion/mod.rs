//! Motion samples and sensor measurement ranges.

pub mod range;
pub mod sample;

pub use range::{AccelRange, GyroRange, RangeError};
pub use sample::{Sample, FEATURE_COUNT, GRAVITY_G};
