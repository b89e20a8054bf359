//! Timer interface trait

use crate::platform::Result;

/// Blocking delays and a monotonic microsecond clock
pub trait TimerInterface {
    /// Block for `us` microseconds
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    /// Microseconds since the timer was created
    fn now_us(&self) -> u64;

    /// Milliseconds since the timer was created
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
