//! Command/response channel abstraction

use super::error::ModemError;

/// Per-command context, discarded after the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModemSession<'a> {
    /// Command text without line terminator
    pub command: &'a str,
    /// Substring that marks success
    pub expected: &'a str,
    /// Wait after writing, before reading (ms)
    pub settle_ms: u32,
}

impl<'a> ModemSession<'a> {
    pub fn new(command: &'a str, expected: &'a str, settle_ms: u32) -> Self {
        Self {
            command,
            expected,
            settle_ms,
        }
    }
}

/// Everything the modem sent back during one exchange
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    /// Accumulated bytes, decoded lossily
    pub text: String,
    /// Whether the expected substring appeared
    pub matched: bool,
}

impl RawResponse {
    /// Build a response and evaluate `expected` against it
    pub fn new(text: String, expected: &str) -> Self {
        let matched = !expected.is_empty() && text.contains(expected);
        Self { text, matched }
    }

    /// Convert an unmatched response into `CommandTimeout`
    pub fn require(self, session: &ModemSession<'_>) -> Result<Self, ModemError> {
        if self.matched {
            Ok(self)
        } else {
            Err(ModemError::CommandTimeout {
                command: session.command.to_string(),
                expected: session.expected.to_string(),
            })
        }
    }
}

/// Half-duplex link to the modem
///
/// Implementations never retry; the caller inspects [`RawResponse::matched`]
/// and decides.
pub trait ModemChannel {
    /// Send one AT command and collect the reply
    ///
    /// # Errors
    ///
    /// Only transport failures are errors. A missing token is reported
    /// through `matched`.
    fn send_command(&mut self, session: ModemSession<'_>) -> Result<RawResponse, ModemError>;

    /// Write raw bytes (no terminator), wait `wait_ms`, then read whatever
    /// arrived
    ///
    /// Used for the SMS body after the `>` prompt.
    fn send_payload(&mut self, payload: &[u8], wait_ms: u32) -> Result<String, ModemError>;
}

impl<C: ModemChannel + ?Sized> ModemChannel for Box<C> {
    fn send_command(&mut self, session: ModemSession<'_>) -> Result<RawResponse, ModemError> {
        (**self).send_command(session)
    }

    fn send_payload(&mut self, payload: &[u8], wait_ms: u32) -> Result<String, ModemError> {
        (**self).send_payload(payload, wait_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_substring() {
        assert!(RawResponse::new("\r\nOK\r\n".into(), "OK").matched);
        assert!(!RawResponse::new("\r\nERROR\r\n".into(), "OK").matched);
        assert!(!RawResponse::new(String::new(), "OK").matched);
    }

    #[test]
    fn test_require_reports_command() {
        let session = ModemSession::new("AT+CGNSINF", "+CGNSINF:", 2000);
        let err = RawResponse::new("ERROR".into(), session.expected)
            .require(&session)
            .unwrap_err();
        assert_eq!(
            err,
            ModemError::CommandTimeout {
                command: "AT+CGNSINF".into(),
                expected: "+CGNSINF:".into()
            }
        );
    }
}
