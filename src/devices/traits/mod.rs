//! Device traits
//!
//! Hardware-independent capability interfaces. The detection pipeline only
//! sees these; whether a source is a real sensor or a simulation is decided
//! when it is constructed.

pub mod location;
pub mod motion;

pub use location::LocationSource;
pub use motion::{MotionError, MotionSource};
