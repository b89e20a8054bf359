//! Cellular modem
//!
//! The [`ModemChannel`] trait is the half-duplex command/response link.
//! [`AtChannel`] drives a real UART; [`SimulatedModem`] answers from a
//! script. [`Sim7000`] builds the modem operations (initialization, signal
//! strength, SMS, built-in GNSS) on top of either.

mod at;
mod channel;
mod error;
mod sim7000;
mod simulated;

pub use at::AtChannel;
pub use channel::{ModemChannel, ModemSession, RawResponse};
pub use error::ModemError;
pub use sim7000::{Sim7000, DEFAULT_SETTLE_MS, GNSS_SETTLE_MS, SMS_SEND_WAIT_MS};
pub use simulated::{ModemLog, SimulatedModem};
