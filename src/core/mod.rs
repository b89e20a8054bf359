//! Core runtime infrastructure
//!
//! Logging, std-backed shared state and clocks, and the periodic ticker
//! that drives the sampling loop.

pub mod logging;
pub mod scheduler;
pub mod traits;
