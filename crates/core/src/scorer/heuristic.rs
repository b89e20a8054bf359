//! Peak-acceleration classifier used when no trained model is deployed.

use super::classifier::{Classifier, ModelShape};
use crate::motion::AccelRange;
use crate::window::NormalizedBlock;

/// Acceleration magnitude where confidence starts rising (g).
pub const DEFAULT_ONSET_G: f32 = 1.6;

/// Acceleration magnitude that maps to full confidence (g).
pub const DEFAULT_SATURATION_G: f32 = 2.5;

/// Scores a window by its peak acceleration magnitude.
///
/// Confidence rises linearly from 0 at `onset_g` to 1 at `saturation_g`.
/// The block is normalized, so the accelerometer range is needed to recover
/// physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactHeuristic {
    shape: ModelShape,
    accel_full_scale: f32,
    onset_g: f32,
    saturation_g: f32,
}

impl ImpactHeuristic {
    pub fn new(timesteps: usize, accel_range: AccelRange) -> Self {
        Self {
            shape: ModelShape::new(timesteps),
            accel_full_scale: accel_range.full_scale(),
            onset_g: DEFAULT_ONSET_G,
            saturation_g: DEFAULT_SATURATION_G,
        }
    }

    /// Override the response curve. Ignored unless `onset_g < saturation_g`.
    pub fn with_curve(mut self, onset_g: f32, saturation_g: f32) -> Self {
        if onset_g < saturation_g {
            self.onset_g = onset_g;
            self.saturation_g = saturation_g;
        }
        self
    }

    fn peak_magnitude_g(&self, block: &NormalizedBlock) -> f32 {
        block
            .iter()
            .map(|row| {
                let x = row[0] * self.accel_full_scale;
                let y = row[1] * self.accel_full_scale;
                let z = row[2] * self.accel_full_scale;
                libm::sqrtf(x * x + y * y + z * z)
            })
            .fold(0.0, f32::max)
    }
}

impl Classifier for ImpactHeuristic {
    fn is_loaded(&self) -> bool {
        true
    }

    fn input_shape(&self) -> ModelShape {
        self.shape
    }

    fn accepts_window(&self, _timesteps: usize) -> bool {
        true
    }

    fn reconfigure(&mut self, timesteps: usize, accel_range: AccelRange) {
        self.shape = ModelShape::new(timesteps);
        self.accel_full_scale = accel_range.full_scale();
    }

    fn score(&mut self, block: &NormalizedBlock) -> Option<f32> {
        let peak = self.peak_magnitude_g(block);
        let span = self.saturation_g - self.onset_g;
        Some(((peak - self.onset_g) / span).clamp(0.0, 1.0))
    }
}
