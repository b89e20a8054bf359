//! Alert lifecycle: arm on detection, count down, cancel or fire.
//!
//! ```text
//! Idle --(event)--> Pending --(deadline)--> Sent
//!                      |
//!                      +----(cancel)-----> Cancelled
//! Sent / Cancelled --(reset or cooldown)--> Idle
//! ```

pub mod cancel;
pub mod machine;
pub mod message;
pub mod state;

pub use cancel::CancelSignal;
pub use machine::{AlertAction, AlertStateMachine};
pub use message::{compose_alert_message, AlertMessage, MAX_MESSAGE_LEN};
pub use state::{AlertState, Delivery, Incident};
