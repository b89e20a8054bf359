//! Periodic scheduling for the sampling loop
//!
//! The loop computes its next deadline from the previous one and sleeps
//! only the remainder, so processing time does not stretch the period.
//! Timing types and statistics come from `crash_beacon_core::scheduler`.

pub mod ticker;

pub use crash_beacon_core::scheduler::{LoopTiming, TickStats};
pub use ticker::PeriodicTicker;
