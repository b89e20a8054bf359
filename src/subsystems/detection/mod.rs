//! Accident detection subsystem
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   sample   ┌──────────────┐  block  ┌────────┐
//! │ MotionSource │──────────▶│ WindowBuffer │───────▶│ Scorer │
//! └──────────────┘            └──────────────┘         └───┬────┘
//!                                                          │ verdict
//!  ButtonWatcher ──▶ CancelSignal ──────────────┐          ▼
//!  (own thread)                                 │  ┌───────────────────┐
//!                                               └─▶│ AlertStateMachine │
//!  LocationTracker ── fix ──────────────────────┐  │ (StdState, Arc)   │
//!                                               │  └─────────┬─────────┘
//!                                               ▼            │ Fire
//!                                        ┌──────────────┐◀───┘
//!                                        │AlertDispatcher│── inline or worker thread
//!                                        └──────┬───────┘
//!                                               ▼
//!                                   AlertService ── Sim7000 ── ModemChannel
//! ```
//!
//! [`DetectionPipeline::tick`] runs one sampling period. The modem is only
//! touched by the dispatcher, so a threaded dispatcher keeps multi-second
//! AT exchanges off the sampling cadence.

mod button;
mod dispatch;
mod indicator;
mod location;
mod model;
mod pipeline;
mod runner;
mod service;

pub use button::{ButtonWatcher, DEBOUNCE_US};
pub use dispatch::{
    AlertDispatcher, AlertJob, DeliveryWorker, InlineDispatcher, ThreadedDispatcher,
};
pub use indicator::StatusIndicator;
pub use location::LocationTracker;
pub use model::ModelSelection;
pub use pipeline::{AlertHandle, DetectionPipeline, TickReport};
pub use runner::{run, RunSummary};
pub use service::{AlertError, AlertService, LocationFallback};
