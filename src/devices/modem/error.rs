//! Modem error types

use crate::platform::PlatformError;

/// Modem operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModemError {
    /// `AT` liveness check got no `OK`
    #[error("modem not responding to AT commands")]
    NotResponding,
    /// `AT+CPIN?` did not report READY
    #[error("SIM card not ready")]
    SimNotReady,
    /// `AT+CREG?` reported neither home nor roaming registration
    #[error("not registered to a network")]
    NotRegistered,
    /// Expected token absent from the accumulated response
    #[error("no {expected:?} in response to {command}")]
    CommandTimeout { command: String, expected: String },
    /// Operation attempted before successful initialization
    #[error("modem not initialized")]
    NotInitialized,
    /// SMS body answered without OK or +CMGS
    #[error("SMS rejected: {response:?}")]
    SmsRejected { response: String },
    /// Serial link failure
    #[error("modem transport error: {0}")]
    Transport(PlatformError),
}

impl From<PlatformError> for ModemError {
    fn from(err: PlatformError) -> Self {
        ModemError::Transport(err)
    }
}
