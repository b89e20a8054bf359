//! AT command channel over a UART

use crash_beacon_core::modem::commands::CRLF;

use super::channel::{ModemChannel, ModemSession, RawResponse};
use super::error::ModemError;
use crate::platform::{TimerInterface, UartInterface};

/// Total read window after the settle delay (ms)
pub const READ_WINDOW_MS: u32 = 2_000;

/// Read slice within the window (ms)
pub const READ_SLICE_MS: u32 = 100;

const CHUNK_LEN: usize = 64;

/// AT channel over any `UartInterface`
///
/// Owns the serial link exclusively. Every exchange flushes stale input,
/// writes the command, waits the settle time and then reads for a fixed
/// window.
pub struct AtChannel<U: UartInterface, T: TimerInterface> {
    uart: U,
    timer: T,
}

impl<U: UartInterface, T: TimerInterface> AtChannel<U, T> {
    pub fn new(uart: U, timer: T) -> Self {
        Self { uart, timer }
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Drain whatever is buffered right now
    fn drain_into(&mut self, out: &mut Vec<u8>) -> Result<(), ModemError> {
        let mut buf = [0u8; CHUNK_LEN];
        while self.uart.available() {
            let n = self.uart.read(&mut buf)?;
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        Ok(())
    }
}

impl<U: UartInterface, T: TimerInterface> ModemChannel for AtChannel<U, T> {
    fn send_command(&mut self, session: ModemSession<'_>) -> Result<RawResponse, ModemError> {
        let stale = self.uart.clear_rx()?;
        if stale > 0 {
            crate::log_trace!("Discarded {} stale bytes before {}", stale, session.command);
        }

        let mut line = Vec::with_capacity(session.command.len() + CRLF.len());
        line.extend_from_slice(session.command.as_bytes());
        line.extend_from_slice(CRLF.as_bytes());
        self.uart.write_all(&line)?;
        self.timer.delay_ms(session.settle_ms)?;

        let mut raw = Vec::new();
        for _ in 0..READ_WINDOW_MS / READ_SLICE_MS {
            self.drain_into(&mut raw)?;
            self.timer.delay_ms(READ_SLICE_MS)?;
        }

        let text = String::from_utf8_lossy(&raw).into_owned();
        crate::log_trace!("{} -> {:?}", session.command, text);
        Ok(RawResponse::new(text, session.expected))
    }

    fn send_payload(&mut self, payload: &[u8], wait_ms: u32) -> Result<String, ModemError> {
        self.uart.write_all(payload)?;
        self.timer.delay_ms(wait_ms)?;

        let mut raw = Vec::new();
        self.drain_into(&mut raw)?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}
