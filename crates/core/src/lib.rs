//! crash_beacon_core - Pure no_std detection and alert logic for crash_beacon
//!
//! This crate contains the platform-agnostic pieces of the accident
//! detector: sample types, the sliding window, the scoring contract, the
//! cancellable alert state machine and the text protocols spoken by the
//! cellular modem. Everything here can be tested on host without hardware.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Platform services injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Shared-state abstraction for cross-context access
//! - [`motion`]: Motion samples and sensor measurement ranges
//! - [`window`]: Fixed-capacity sliding window and normalization
//! - [`scorer`]: Classifier contract and thresholded verdicts
//! - [`alert`]: Alert lifecycle state machine and message composition
//! - [`location`]: Location fixes, staleness and modem GNSS parsing
//! - [`modem`]: AT command constants and response parsing
//! - [`parameters`]: Detector configuration and validation
//! - [`scheduler`]: Loop timing statistics

#![no_std]

pub mod alert;
pub mod location;
pub mod modem;
pub mod motion;
pub mod parameters;
pub mod scheduler;
pub mod scorer;
pub mod traits;
pub mod window;
