//! Mock Timer implementation for testing

use crate::platform::{traits::TimerInterface, Result};

/// Mock Timer implementation
///
/// Delays return immediately and advance a simulated clock, so code that
/// waits out modem settle times runs instantly under test.
#[derive(Debug, Default)]
pub struct MockTimer {
    now_us: u64,
    delays: Vec<u32>,
}

impl MockTimer {
    /// Create a new mock timer at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock timer starting at `now_us`
    pub fn starting_at(now_us: u64) -> Self {
        Self {
            now_us,
            delays: Vec::new(),
        }
    }

    /// Move the clock without recording a delay
    pub fn advance_us(&mut self, us: u64) {
        self.now_us = self.now_us.saturating_add(us);
    }

    /// Every delay requested so far (µs)
    pub fn delays(&self) -> &[u32] {
        &self.delays
    }

    /// Sum of all requested delays (µs)
    pub fn total_delay_us(&self) -> u64 {
        self.delays.iter().map(|&d| d as u64).sum()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.delays.push(us);
        self.now_us = self.now_us.saturating_add(us as u64);
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_timer_delay_us() {
        let mut timer = MockTimer::new();
        timer.delay_us(1000).unwrap();
        timer.delay_us(500).unwrap();
        assert_eq!(timer.now_us(), 1500);
        assert_eq!(timer.delays(), &[1000, 500]);
    }

    #[test]
    fn test_mock_timer_delay_ms() {
        let mut timer = MockTimer::new();
        timer.delay_ms(1).unwrap();
        timer.delay_ms(5).unwrap();
        assert_eq!(timer.now_us(), 6000);
        assert_eq!(timer.total_delay_us(), 6000);
    }

    #[test]
    fn test_advance_is_not_a_delay() {
        let mut timer = MockTimer::starting_at(10);
        timer.advance_us(3_500);
        assert_eq!(timer.now_ms(), 3);
        assert!(timer.delays().is_empty());
    }
}
