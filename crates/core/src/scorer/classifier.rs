//! Classifier trait and simple implementations.

use crate::motion::{AccelRange, FEATURE_COUNT};
use crate::window::NormalizedBlock;

/// Model input shape `(1, timesteps, features)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelShape {
    pub timesteps: usize,
    pub features: usize,
}

impl ModelShape {
    pub const fn new(timesteps: usize) -> Self {
        Self {
            timesteps,
            features: FEATURE_COUNT,
        }
    }
}

/// An opaque binary accident classifier.
///
/// `score` maps a normalized window to a confidence in [0, 1]. It may
/// return `None` if inference fails; the scorer treats that the same as an
/// unavailable model.
pub trait Classifier {
    /// Whether the model is loaded and usable.
    fn is_loaded(&self) -> bool;

    /// Expected input shape.
    fn input_shape(&self) -> ModelShape;

    /// Run inference on one window.
    fn score(&mut self, block: &NormalizedBlock) -> Option<f32>;

    /// Whether a window of `timesteps` samples can be scored.
    ///
    /// Trained models accept exactly their input length.
    fn accepts_window(&self, timesteps: usize) -> bool {
        self.input_shape().timesteps == timesteps
    }

    /// Follow a change of window size or accelerometer range.
    ///
    /// Only called with a window size `accepts_window` allowed.
    fn reconfigure(&mut self, _timesteps: usize, _accel_range: AccelRange) {}
}

/// Classifier that returns a configurable constant.
///
/// Stands in for the model in tests and simulated runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClassifier {
    shape: ModelShape,
    confidence: f32,
}

impl FixedClassifier {
    pub fn new(timesteps: usize, confidence: f32) -> Self {
        Self {
            shape: ModelShape::new(timesteps),
            confidence,
        }
    }

    pub fn set_confidence(&mut self, confidence: f32) {
        self.confidence = confidence;
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}

impl Classifier for FixedClassifier {
    fn is_loaded(&self) -> bool {
        true
    }

    fn input_shape(&self) -> ModelShape {
        self.shape
    }

    fn score(&mut self, _block: &NormalizedBlock) -> Option<f32> {
        Some(self.confidence)
    }
}

/// Classifier for a model that failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnavailableClassifier {
    shape: ModelShape,
}

impl UnavailableClassifier {
    pub fn new(timesteps: usize) -> Self {
        Self {
            shape: ModelShape::new(timesteps),
        }
    }
}

impl Classifier for UnavailableClassifier {
    fn is_loaded(&self) -> bool {
        false
    }

    fn input_shape(&self) -> ModelShape {
        self.shape
    }

    fn score(&mut self, _block: &NormalizedBlock) -> Option<f32> {
        None
    }
}
