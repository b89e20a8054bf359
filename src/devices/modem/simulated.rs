//! Scripted modem
//!
//! Answers AT commands the way a healthy SIM7000 does, without a serial
//! port or delays. A shared [`ModemLog`] records every command and every
//! SMS body so callers can inspect traffic after handing the modem to
//! another thread.

use std::sync::{Arc, Mutex, MutexGuard};

use crash_beacon_core::modem::commands;

use super::channel::{ModemChannel, ModemSession, RawResponse};
use super::error::ModemError;

#[derive(Debug, Default)]
struct LogInner {
    commands: Vec<String>,
    messages: Vec<String>,
}

/// Shared record of modem traffic
#[derive(Debug, Clone, Default)]
pub struct ModemLog {
    inner: Arc<Mutex<LogInner>>,
}

impl ModemLog {
    fn lock(&self) -> MutexGuard<'_, LogInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Every command sent, in order
    pub fn commands(&self) -> Vec<String> {
        self.lock().commands.clone()
    }

    /// Every SMS body the modem accepted or rejected, in order
    pub fn messages(&self) -> Vec<String> {
        self.lock().messages.clone()
    }

    /// Number of `AT+CMGS` commands issued
    pub fn sms_commands(&self) -> usize {
        self.lock()
            .commands
            .iter()
            .filter(|c| c.starts_with(commands::SEND_SMS_PREFIX))
            .count()
    }
}

/// Simulated SIM7000
#[derive(Debug, Clone)]
pub struct SimulatedModem {
    log: ModemLog,
    responsive: bool,
    sim_ready: bool,
    registered: bool,
    reject_sms: bool,
    csq: u8,
    position: Option<(f64, f64)>,
}

impl Default for SimulatedModem {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedModem {
    /// Registered modem with CSQ 19 (-75 dBm) and no GNSS fix
    pub fn new() -> Self {
        Self {
            log: ModemLog::default(),
            responsive: true,
            sim_ready: true,
            registered: true,
            reject_sms: false,
            csq: 19,
            position: None,
        }
    }

    /// Handle to the traffic log
    pub fn log(&self) -> ModemLog {
        self.log.clone()
    }

    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.position = Some((latitude, longitude));
        self
    }

    pub fn with_signal(mut self, csq: u8) -> Self {
        self.csq = csq;
        self
    }

    /// Modem that never answers
    pub fn unresponsive(mut self) -> Self {
        self.responsive = false;
        self
    }

    pub fn without_sim(mut self) -> Self {
        self.sim_ready = false;
        self
    }

    pub fn unregistered(mut self) -> Self {
        self.registered = false;
        self
    }

    /// Answer every SMS body with ERROR
    pub fn rejecting_sms(mut self) -> Self {
        self.reject_sms = true;
        self
    }

    fn reply_to(&self, command: &str) -> String {
        if !self.responsive {
            return String::new();
        }
        match command {
            commands::SIM_STATUS if self.sim_ready => "\r\n+CPIN: READY\r\n\r\nOK\r\n".into(),
            commands::SIM_STATUS => "\r\n+CME ERROR: 10\r\n".into(),
            commands::REGISTRATION if self.registered => "\r\n+CREG: 0,1\r\n\r\nOK\r\n".into(),
            commands::REGISTRATION => "\r\n+CREG: 0,2\r\n\r\nOK\r\n".into(),
            commands::SIGNAL_QUALITY => format!("\r\n+CSQ: {},0\r\n\r\nOK\r\n", self.csq),
            commands::GNSS_INFO => match self.position {
                Some((lat, lon)) => format!(
                    "\r\n+CGNSINF: 1,1,{:.6},{:.6},20240101120000.000,0.0\r\n\r\nOK\r\n",
                    lat, lon
                ),
                None => "\r\n+CGNSINF: 1,0,,,,,\r\n\r\nOK\r\n".into(),
            },
            c if c.starts_with(commands::SEND_SMS_PREFIX) => "\r\n> ".into(),
            _ => "\r\nOK\r\n".into(),
        }
    }
}

impl ModemChannel for SimulatedModem {
    fn send_command(&mut self, session: ModemSession<'_>) -> Result<RawResponse, ModemError> {
        self.log.lock().commands.push(session.command.to_string());
        let text = self.reply_to(session.command);
        Ok(RawResponse::new(text, session.expected))
    }

    fn send_payload(&mut self, payload: &[u8], _wait_ms: u32) -> Result<String, ModemError> {
        let body = payload
            .strip_suffix(&[commands::CTRL_Z])
            .unwrap_or(payload);
        self.log
            .lock()
            .messages
            .push(String::from_utf8_lossy(body).into_owned());

        if !self.responsive {
            return Ok(String::new());
        }
        if self.reject_sms {
            return Ok("\r\nERROR\r\n".into());
        }
        Ok("\r\n+CMGS: 1\r\n\r\nOK\r\n".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::modem::Sim7000;
    use crate::devices::traits::LocationSource;

    #[test]
    fn test_full_session_recorded() {
        let modem = SimulatedModem::new().with_signal(15);
        let log = modem.log();
        let mut sim = Sim7000::new(modem, true);

        sim.initialize().unwrap();
        assert_eq!(sim.signal_strength(), Ok(Some(-83)));
        sim.send_sms("+15550100", "EMERGENCY").unwrap();

        assert_eq!(log.sms_commands(), 1);
        assert_eq!(log.messages(), vec!["EMERGENCY".to_string()]);
        assert_eq!(log.commands()[0], "AT");
        assert!(log.commands().contains(&"AT+CMGS=\"+15550100\"".to_string()));
    }

    #[test]
    fn test_failure_modes() {
        let mut sim = Sim7000::new(SimulatedModem::new().unresponsive(), false);
        assert_eq!(sim.initialize(), Err(ModemError::NotResponding));

        let mut sim = Sim7000::new(SimulatedModem::new().without_sim(), true);
        assert_eq!(sim.initialize(), Err(ModemError::SimNotReady));

        let mut sim = Sim7000::new(SimulatedModem::new().unregistered(), true);
        assert_eq!(sim.initialize(), Err(ModemError::NotRegistered));

        let mut sim = Sim7000::new(SimulatedModem::new().rejecting_sms(), true);
        sim.initialize().unwrap();
        assert!(matches!(
            sim.send_sms("1", "x"),
            Err(ModemError::SmsRejected { .. })
        ));
    }

    #[test]
    fn test_gnss_position() {
        let mut sim = Sim7000::new(SimulatedModem::new(), false);
        sim.initialize().unwrap();
        assert_eq!(sim.poll(0), None);

        let mut sim = Sim7000::new(SimulatedModem::new().with_position(40.7128, -74.006), false);
        sim.initialize().unwrap();
        let fix = sim.poll(7).unwrap();
        assert_eq!((fix.latitude, fix.longitude), (40.7128, -74.006));
    }
}
