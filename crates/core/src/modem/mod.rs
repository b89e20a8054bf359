//! AT command vocabulary and response parsing for the cellular modem.
//!
//! Transport and timing live in the host crate; this module only knows
//! what to send and how to read what comes back.

pub mod commands;
pub mod response;

pub use response::{
    contains_token, csq_to_dbm, network_registered, parse_signal_quality, sim_ready,
    sms_accepted, SIGNAL_UNKNOWN,
};
