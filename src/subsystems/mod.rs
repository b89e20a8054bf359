//! Subsystems
//!
//! - `detection`: sampling loop, scoring, alert countdown and delivery

pub mod detection;
