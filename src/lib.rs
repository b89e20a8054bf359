//! crash_beacon - Vehicle accident detection with cancellable SMS alerting
//!
//! Samples a 6-axis motion sensor at a fixed rate, scores a sliding window
//! with a classifier, and after a cancellable countdown sends an emergency
//! SMS with the last known position through a SIM7000 modem.
//!
//! Pure logic (windowing, scoring, alert state machine, AT parsing) lives
//! in `crash_beacon_core` and is re-exported as [`logic`]. This crate adds
//! the platform layer, device drivers and the threaded runtime.

/// Platform-independent logic from `crash_beacon_core`
pub use crash_beacon_core as logic;

// Platform abstraction layer
pub mod platform;

// Logging, std synchronization and the periodic ticker
pub mod core;

// Device drivers using platform abstraction
pub mod devices;

// Detection pipeline, alert delivery and cancel input
pub mod subsystems;

// Environment-backed settings
pub mod parameters;
