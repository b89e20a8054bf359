//! Classifier contract and thresholded verdicts.
//!
//! The model itself is an external artifact. Anything that can turn a
//! normalized window into a confidence in [0, 1] implements [`Classifier`];
//! [`Scorer`] applies the threshold and shields the loop from bad outputs.

pub mod classifier;
pub mod heuristic;

pub use classifier::{Classifier, FixedClassifier, ModelShape, UnavailableClassifier};
pub use heuristic::ImpactHeuristic;

use crate::window::NormalizedBlock;

/// Outcome of scoring one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// `confidence > threshold`
    pub is_event: bool,
    /// Classifier output clamped to [0, 1]
    pub confidence: f32,
}

/// Snapshot of the scorer for status reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInfo {
    pub loaded: bool,
    pub input_shape: ModelShape,
    pub threshold: f32,
}

/// Wraps a classifier with a runtime-adjustable threshold.
pub struct Scorer<C: Classifier> {
    classifier: C,
    threshold: f32,
}

impl<C: Classifier> Scorer<C> {
    /// Create a scorer. An out-of-range threshold falls back to 0.7.
    pub fn new(classifier: C, threshold: f32) -> Self {
        let mut scorer = Self {
            classifier,
            threshold: DEFAULT_THRESHOLD,
        };
        scorer.set_threshold(threshold);
        scorer
    }

    /// Score a window.
    ///
    /// Returns `None` when the classifier is unavailable, the block does not
    /// match the model's input shape, or the classifier produced no usable
    /// number. Detection is suppressed in all three cases.
    pub fn evaluate(&mut self, block: &NormalizedBlock) -> Option<Verdict> {
        if !self.classifier.is_loaded() {
            return None;
        }
        let shape = self.classifier.input_shape();
        if block.len() != shape.timesteps || shape.features != crate::motion::FEATURE_COUNT {
            return None;
        }
        let raw = self.classifier.score(block)?;
        if raw.is_nan() {
            return None;
        }
        let confidence = raw.clamp(0.0, 1.0);
        Some(Verdict {
            is_event: confidence > self.threshold,
            confidence,
        })
    }

    /// Replace the threshold. Values outside [0, 1] are ignored.
    ///
    /// Returns whether the new value was accepted.
    pub fn set_threshold(&mut self, threshold: f32) -> bool {
        if (0.0..=1.0).contains(&threshold) {
            self.threshold = threshold;
            true
        } else {
            false
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            loaded: self.classifier.is_loaded(),
            input_shape: self.classifier.input_shape(),
            threshold: self.threshold,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }
}

const DEFAULT_THRESHOLD: f32 = 0.7;

#[cfg(test)]
mod tests {
    use super::*;

    fn block(rows: usize) -> NormalizedBlock {
        let mut block = NormalizedBlock::new();
        for _ in 0..rows {
            block.push([0.0, 0.0, 0.5, 0.0, 0.0, 0.0]).unwrap();
        }
        block
    }

    #[test]
    fn verdict_uses_strict_threshold() {
        let mut scorer = Scorer::new(FixedClassifier::new(50, 0.7), 0.7);
        let verdict = scorer.evaluate(&block(50)).unwrap();
        assert!(!verdict.is_event);

        scorer.classifier_mut().set_confidence(0.71);
        assert!(scorer.evaluate(&block(50)).unwrap().is_event);
    }

    #[test]
    fn unavailable_model_yields_none() {
        let mut scorer = Scorer::new(UnavailableClassifier::new(50), 0.7);
        assert!(scorer.evaluate(&block(50)).is_none());
        assert!(!scorer.model_info().loaded);
    }

    #[test]
    fn shape_mismatch_yields_none() {
        let mut scorer = Scorer::new(FixedClassifier::new(50, 0.9), 0.7);
        assert!(scorer.evaluate(&block(49)).is_none());
    }

    #[test]
    fn nan_and_out_of_range_outputs() {
        let mut scorer = Scorer::new(FixedClassifier::new(10, f32::NAN), 0.5);
        assert!(scorer.evaluate(&block(10)).is_none());

        scorer.classifier_mut().set_confidence(1.7);
        let verdict = scorer.evaluate(&block(10)).unwrap();
        assert_eq!(verdict.confidence, 1.0);
        assert!(verdict.is_event);

        scorer.classifier_mut().set_confidence(-3.0);
        assert_eq!(scorer.evaluate(&block(10)).unwrap().confidence, 0.0);
    }

    #[test]
    fn threshold_rejects_out_of_range() {
        let mut scorer = Scorer::new(FixedClassifier::new(10, 0.5), 0.6);
        assert!(!scorer.set_threshold(1.5));
        assert!(!scorer.set_threshold(-0.1));
        assert!(!scorer.set_threshold(f32::NAN));
        assert_eq!(scorer.threshold(), 0.6);

        assert!(scorer.set_threshold(0.0));
        assert_eq!(scorer.threshold(), 0.0);
        assert!(scorer.set_threshold(1.0));
        assert_eq!(scorer.threshold(), 1.0);
    }

    #[test]
    fn invalid_initial_threshold_uses_default() {
        let scorer = Scorer::new(FixedClassifier::new(10, 0.5), 4.0);
        assert_eq!(scorer.threshold(), 0.7);
    }

    #[test]
    fn model_info_reports_shape() {
        let scorer = Scorer::new(FixedClassifier::new(50, 0.1), 0.7);
        let info = scorer.model_info();
        assert!(info.loaded);
        assert_eq!(info.input_shape, ModelShape::new(50));
        assert_eq!(info.threshold, 0.7);
    }
}
