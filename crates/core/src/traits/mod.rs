//! Core traits for platform-agnostic detector functionality.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Thread-backed implementations live in the host crate

pub mod sync;
pub mod time;

pub use sync::{MockState, SharedState};
pub use time::{MockTime, TimeSource};
