//! Fixed-capacity FIFO window.

use heapless::{Deque, Vec};

use super::normalize::Normalizer;
use super::stats::WindowStats;
use crate::motion::{AccelRange, GyroRange, Sample, FEATURE_COUNT};
use crate::parameters::ConfigError;

/// Largest window the buffer can be configured with.
pub const MAX_WINDOW_SIZE: usize = 256;

/// Dense `N × 6` block handed to the classifier.
///
/// Rows are in arrival order (oldest first). The block is rebuilt on every
/// request and owns its data; the classifier never sees the live window.
pub type NormalizedBlock = Vec<[f32; FEATURE_COUNT], MAX_WINDOW_SIZE>;

/// Insertion-ordered ring of the most recent `capacity` samples.
///
/// Once full, each push evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct WindowBuffer {
    samples: Deque<Sample, MAX_WINDOW_SIZE>,
    capacity: usize,
    normalizer: Normalizer,
}

impl WindowBuffer {
    /// Create an empty window.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::WindowSize` if `capacity` is zero or larger
    /// than [`MAX_WINDOW_SIZE`].
    pub fn new(capacity: usize, accel: AccelRange, gyro: GyroRange) -> Result<Self, ConfigError> {
        if capacity == 0 || capacity > MAX_WINDOW_SIZE {
            return Err(ConfigError::WindowSize(capacity));
        }
        Ok(Self {
            samples: Deque::new(),
            capacity,
            normalizer: Normalizer::new(accel, gyro),
        })
    }

    /// Append a sample, evicting the oldest when full. O(1).
    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        // capacity <= MAX_WINDOW_SIZE, so there is always room here
        let _ = self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Drop all samples, keeping configuration.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Normalized copy of the window, or `None` until the window is full.
    pub fn snapshot_normalized(&self) -> Option<NormalizedBlock> {
        if !self.is_full() {
            return None;
        }
        let mut block = NormalizedBlock::new();
        for sample in self.samples.iter() {
            // block capacity equals MAX_WINDOW_SIZE >= len
            let _ = block.push(self.normalizer.normalize(sample));
        }
        Some(block)
    }

    /// Summary statistics of the physical (un-normalized) samples.
    pub fn statistics(&self) -> Option<WindowStats> {
        WindowStats::compute(self.samples.iter())
    }
}
