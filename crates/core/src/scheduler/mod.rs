//! Loop timing types and statistics
//!
//! The sampling loop itself runs in the host crate; this module describes
//! its timing contract and tracks how well it is met.
//!
//! # Example
//!
//! ```rust
//! use crash_beacon_core::scheduler::{LoopTiming, TickStats};
//!
//! let timing = LoopTiming::from_rate("sampler", 50);
//! assert_eq!(timing.period_us(), 20_000);
//!
//! let mut stats = TickStats::default();
//! stats.update(1_200, 20_100, timing.period_us(), timing.budget_us);
//! assert_eq!(stats.deadline_misses, 0);
//! ```

pub mod types;

pub use types::*;
