//! Sliding window of recent motion samples.
//!
//! The window is the classifier's view of the world: the last N samples in
//! arrival order, normalized to the sensor's full-scale range.

pub mod buffer;
pub mod normalize;
pub mod stats;

pub use buffer::{NormalizedBlock, WindowBuffer, MAX_WINDOW_SIZE};
pub use normalize::{clip_to_range, normalize_value, Normalizer};
pub use stats::WindowStats;
