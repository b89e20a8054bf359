//! SIM7000 GSM/GNSS modem operations

use crash_beacon_core::location::{parse_cgnsinf, LocationFix};
use crash_beacon_core::modem::{
    commands, network_registered, parse_signal_quality, sim_ready, sms_accepted,
};

use super::channel::{ModemChannel, ModemSession};
use super::error::ModemError;
use crate::devices::traits::LocationSource;

/// Settle time for ordinary commands (ms)
pub const DEFAULT_SETTLE_MS: u32 = 1_000;

/// Settle time for `AT+CGNSINF` (ms)
pub const GNSS_SETTLE_MS: u32 = 2_000;

/// Wait after the SMS body before reading the result (ms)
pub const SMS_SEND_WAIT_MS: u32 = 3_000;

/// SIM7000 driver over a [`ModemChannel`]
///
/// Operations other than [`initialize`](Self::initialize) fail fast with
/// `NotInitialized` until initialization has succeeded.
pub struct Sim7000<C: ModemChannel> {
    channel: C,
    strict: bool,
    initialized: bool,
    last_fix: Option<LocationFix>,
}

impl<C: ModemChannel> Sim7000<C> {
    /// Wrap a channel
    ///
    /// With `strict` set, a SIM that is not READY or a modem that is not
    /// registered fails initialization; otherwise both are only logged.
    pub fn new(channel: C, strict: bool) -> Self {
        Self {
            channel,
            strict,
            initialized: false,
            last_fix: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    fn command(&mut self, command: &str, expected: &str, settle_ms: u32) -> Result<String, ModemError> {
        let response = self
            .channel
            .send_command(ModemSession::new(command, expected, settle_ms))?;
        Ok(response.text)
    }

    /// Bring the modem into SMS text mode
    ///
    /// # Errors
    ///
    /// `NotResponding` if `AT` gets no `OK`. In strict mode also
    /// `SimNotReady` and `NotRegistered`.
    pub fn initialize(&mut self) -> Result<(), ModemError> {
        self.initialized = false;
        crate::log_info!("Initializing SIM7000");

        let liveness = self
            .channel
            .send_command(ModemSession::new(commands::AT, commands::OK, DEFAULT_SETTLE_MS))?;
        if !liveness.matched {
            crate::log_error!("Modem not responding to AT commands");
            return Err(ModemError::NotResponding);
        }

        for setup in [
            commands::TEXT_MODE,
            commands::CHARSET_GSM,
            commands::NEW_MESSAGE_INDICATION,
        ] {
            self.command(setup, commands::OK, DEFAULT_SETTLE_MS)?;
        }

        let sim = self.command(commands::SIM_STATUS, commands::SIM_READY, DEFAULT_SETTLE_MS)?;
        if !sim_ready(&sim) {
            if self.strict {
                crate::log_error!("SIM card not ready");
                return Err(ModemError::SimNotReady);
            }
            crate::log_warn!("SIM card not ready, continuing");
        }

        let reg = self.command(commands::REGISTRATION, commands::OK, DEFAULT_SETTLE_MS)?;
        if !network_registered(&reg) {
            if self.strict {
                crate::log_error!("Not registered to network");
                return Err(ModemError::NotRegistered);
            }
            crate::log_warn!("Not registered to network, continuing");
        }

        self.initialized = true;
        crate::log_info!("SIM7000 initialized successfully");
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), ModemError> {
        if self.initialized {
            Ok(())
        } else {
            Err(ModemError::NotInitialized)
        }
    }

    /// Received signal strength in dBm, `None` if unknown or unparseable
    pub fn signal_strength(&mut self) -> Result<Option<i32>, ModemError> {
        self.ensure_initialized()?;
        let text = self.command(commands::SIGNAL_QUALITY, commands::CSQ_TAG, DEFAULT_SETTLE_MS)?;
        let dbm = parse_signal_quality(&text);
        match dbm {
            Some(dbm) => crate::log_info!("Signal strength: {} dBm", dbm),
            None => crate::log_warn!("Signal strength unknown"),
        }
        Ok(dbm)
    }

    /// Send a text message
    ///
    /// One attempt: command, `>` prompt, body terminated by Ctrl-Z, then a
    /// fixed wait. Success iff the reply contains `OK` or `+CMGS`.
    pub fn send_sms(&mut self, number: &str, body: &str) -> Result<(), ModemError> {
        self.ensure_initialized()?;

        let command = format!("{}\"{}\"", commands::SEND_SMS_PREFIX, number);
        let prompt = self
            .channel
            .send_command(ModemSession::new(&command, commands::SMS_PROMPT, DEFAULT_SETTLE_MS))?;
        if !prompt.matched {
            crate::log_warn!("No SMS prompt from modem, sending body anyway");
        }

        let mut payload = Vec::with_capacity(body.len() + 1);
        payload.extend_from_slice(body.as_bytes());
        payload.push(commands::CTRL_Z);
        let reply = self.channel.send_payload(&payload, SMS_SEND_WAIT_MS)?;

        if sms_accepted(&reply) {
            crate::log_info!("SMS sent successfully to {}", number);
            Ok(())
        } else {
            crate::log_error!("Failed to send SMS to {}: {:?}", number, reply);
            Err(ModemError::SmsRejected { response: reply })
        }
    }

    /// Position from the modem's own GNSS receiver
    ///
    /// `Ok(None)` when the receiver answers but has no fix.
    pub fn gps_location(&mut self) -> Result<Option<(f64, f64)>, ModemError> {
        self.ensure_initialized()?;
        self.command(commands::GNSS_POWER_ON, commands::OK, DEFAULT_SETTLE_MS)?;

        let session = ModemSession::new(commands::GNSS_INFO, "+CGNSINF:", GNSS_SETTLE_MS);
        let response = self.channel.send_command(session)?.require(&session)?;
        Ok(parse_cgnsinf(&response.text))
    }
}

impl<C: ModemChannel> LocationSource for Sim7000<C> {
    fn poll(&mut self, now_us: u64) -> Option<LocationFix> {
        match self.gps_location() {
            Ok(Some((lat, lon))) => {
                self.last_fix = Some(LocationFix::new(lat, lon, now_us));
            }
            Ok(None) => crate::log_debug!("Modem GNSS has no fix"),
            Err(err) => crate::log_debug!("Modem GNSS query failed: {}", err),
        }
        self.last_fix
    }
}
