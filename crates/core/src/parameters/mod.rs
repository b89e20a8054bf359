//! Detector configuration and validation.
//!
//! Host-side loading (environment, CLI) lives in the root crate; this module
//! owns the typed values and their bounds.

pub mod detector;
pub mod error;

pub use detector::{DetectorConfig, RearmPolicy};
pub use error::ConfigError;
