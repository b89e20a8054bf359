//! Cancel button
//!
//! The button is the only asynchronous input. It never touches the alert
//! state directly; a debounced press only raises the [`CancelSignal`],
//! which the sampling loop consumes on its next tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crash_beacon_core::alert::CancelSignal;

use crate::platform::{GpioInterface, Result, TimerInterface};

/// Level must hold this long before a change is accepted (µs)
pub const DEBOUNCE_US: u64 = 50_000;

/// Polling period of the watcher thread (ms)
const POLL_INTERVAL_MS: u32 = 5;

/// Debounced falling-edge detector on a pulled-up input
pub struct ButtonWatcher<G: GpioInterface> {
    pin: G,
    cancel: Arc<CancelSignal>,
    stable_high: bool,
    candidate: Option<(bool, u64)>,
    presses: u32,
}

impl<G: GpioInterface> ButtonWatcher<G> {
    /// Watch `pin`; the button is assumed released at start
    pub fn new(pin: G, cancel: Arc<CancelSignal>) -> Self {
        Self {
            pin,
            cancel,
            stable_high: true,
            candidate: None,
            presses: 0,
        }
    }

    /// Sample the pin once
    ///
    /// Returns `true` when a debounced press was registered and the cancel
    /// signal raised.
    pub fn poll(&mut self, now_us: u64) -> Result<bool> {
        let high = self.pin.is_high()?;
        if high == self.stable_high {
            self.candidate = None;
            return Ok(false);
        }

        match self.candidate {
            Some((level, since)) if level == high => {
                if now_us.saturating_sub(since) < DEBOUNCE_US {
                    return Ok(false);
                }
                self.stable_high = high;
                self.candidate = None;
                if !high {
                    self.presses += 1;
                    self.cancel.request();
                    crate::log_info!("Cancel button pressed");
                    return Ok(true);
                }
            }
            _ => self.candidate = Some((high, now_us)),
        }
        Ok(false)
    }

    /// Presses registered so far
    pub fn presses(&self) -> u32 {
        self.presses
    }
}

impl<G: GpioInterface + Send + 'static> ButtonWatcher<G> {
    /// Poll on a dedicated thread until `stop` is set
    ///
    /// The thread returns the number of registered presses.
    pub fn spawn<T>(mut self, mut timer: T, stop: Arc<AtomicBool>) -> std::io::Result<JoinHandle<u32>>
    where
        T: TimerInterface + Send + 'static,
    {
        thread::Builder::new()
            .name("cancel-button".into())
            .spawn(move || {
                while !stop.load(Ordering::Acquire) {
                    if let Err(err) = self.poll(timer.now_us()) {
                        crate::log_warn!("Cancel button read failed: {}", err);
                    }
                    if let Err(err) = timer.delay_ms(POLL_INTERVAL_MS) {
                        crate::log_error!("Cancel button timer failed: {}", err);
                        break;
                    }
                }
                self.presses
            })
    }
}
