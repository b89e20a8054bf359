//! Response predicates and parsers.

use super::commands::{
    CSQ_TAG, OK, REGISTERED_HOME, REGISTERED_ROAMING, SIM_READY, SMS_SENT,
};

/// Raw CSQ value meaning "not known or not detectable".
pub const SIGNAL_UNKNOWN: i32 = 99;

/// Whether `token` occurs anywhere in `response`.
#[inline]
pub fn contains_token(response: &str, token: &str) -> bool {
    response.contains(token)
}

/// Convert a raw CSQ value to dBm.
#[inline]
pub const fn csq_to_dbm(raw: i32) -> i32 {
    -113 + 2 * raw
}

/// Parse an `AT+CSQ` reply into dBm.
///
/// Takes the integer between `+CSQ:` and the following comma. Returns
/// `None` if the tag or comma is missing, the value is not an integer, or
/// the modem reports [`SIGNAL_UNKNOWN`].
pub fn parse_signal_quality(response: &str) -> Option<i32> {
    let start = response.find(CSQ_TAG)? + CSQ_TAG.len();
    let rest = &response[start..];
    let comma = rest.find(',')?;
    let raw: i32 = rest[..comma].trim().parse().ok()?;
    if raw == SIGNAL_UNKNOWN {
        return None;
    }
    Some(csq_to_dbm(raw))
}

/// `AT+CPIN?` reports the SIM as ready.
pub fn sim_ready(response: &str) -> bool {
    contains_token(response, SIM_READY)
}

/// `AT+CREG?` reports home or roaming registration.
pub fn network_registered(response: &str) -> bool {
    contains_token(response, REGISTERED_HOME) || contains_token(response, REGISTERED_ROAMING)
}

/// The modem accepted an SMS body.
pub fn sms_accepted(response: &str) -> bool {
    contains_token(response, OK) || contains_token(response, SMS_SENT)
}
