//! Runtime classifier selection

use crash_beacon_core::motion::AccelRange;
use crash_beacon_core::scorer::{
    Classifier, FixedClassifier, ImpactHeuristic, ModelShape, UnavailableClassifier,
};
use crash_beacon_core::window::NormalizedBlock;

/// Classifier chosen at startup
///
/// Keeps the pipeline monomorphic while letting the binary pick a model
/// from its command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelSelection {
    /// Peak-acceleration heuristic
    Heuristic(ImpactHeuristic),
    /// Constant confidence
    Fixed(FixedClassifier),
    /// No model; detection runs degraded
    Unavailable(UnavailableClassifier),
}

impl Classifier for ModelSelection {
    fn is_loaded(&self) -> bool {
        match self {
            ModelSelection::Heuristic(c) => c.is_loaded(),
            ModelSelection::Fixed(c) => c.is_loaded(),
            ModelSelection::Unavailable(c) => c.is_loaded(),
        }
    }

    fn input_shape(&self) -> ModelShape {
        match self {
            ModelSelection::Heuristic(c) => c.input_shape(),
            ModelSelection::Fixed(c) => c.input_shape(),
            ModelSelection::Unavailable(c) => c.input_shape(),
        }
    }

    fn score(&mut self, block: &NormalizedBlock) -> Option<f32> {
        match self {
            ModelSelection::Heuristic(c) => c.score(block),
            ModelSelection::Fixed(c) => c.score(block),
            ModelSelection::Unavailable(c) => c.score(block),
        }
    }

    fn accepts_window(&self, timesteps: usize) -> bool {
        match self {
            ModelSelection::Heuristic(c) => c.accepts_window(timesteps),
            ModelSelection::Fixed(c) => c.accepts_window(timesteps),
            ModelSelection::Unavailable(c) => c.accepts_window(timesteps),
        }
    }

    fn reconfigure(&mut self, timesteps: usize, accel_range: AccelRange) {
        match self {
            ModelSelection::Heuristic(c) => c.reconfigure(timesteps, accel_range),
            ModelSelection::Fixed(c) => c.reconfigure(timesteps, accel_range),
            ModelSelection::Unavailable(c) => c.reconfigure(timesteps, accel_range),
        }
    }
}
