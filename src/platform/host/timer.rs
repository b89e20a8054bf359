//! std-backed timer

use std::thread;
use std::time::{Duration, Instant};

use crate::platform::{traits::TimerInterface, Result};

/// Timer on `std::time::Instant` and `thread::sleep`
#[derive(Debug, Clone, Copy)]
pub struct StdTimer {
    origin: Instant,
}

impl StdTimer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// A timer sharing another clock's origin
    pub fn with_origin(origin: Instant) -> Self {
        Self { origin }
    }
}

impl Default for StdTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for StdTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        thread::sleep(Duration::from_micros(us as u64));
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}
