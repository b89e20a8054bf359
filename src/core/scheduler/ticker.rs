//! Deadline-based periodic ticker.

use super::{LoopTiming, TickStats};
use crate::platform::{traits::TimerInterface, Result};

/// Drives a loop at a fixed period.
///
/// Call [`wait`](Self::wait) at the top of each iteration and
/// [`finish`](Self::finish) at the bottom. If the loop falls more than a
/// whole period behind, the schedule is re-anchored to the current time
/// instead of running a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct PeriodicTicker {
    timing: LoopTiming,
    next_deadline_us: Option<u64>,
    tick_start_us: Option<u64>,
    previous_start_us: Option<u64>,
    stats: TickStats,
}

impl PeriodicTicker {
    pub fn new(timing: LoopTiming) -> Self {
        Self {
            timing,
            next_deadline_us: None,
            tick_start_us: None,
            previous_start_us: None,
            stats: TickStats::default(),
        }
    }

    pub fn timing(&self) -> &LoopTiming {
        &self.timing
    }

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Sleep until the next tick is due and return its start time (µs).
    ///
    /// # Errors
    ///
    /// Propagates timer failures.
    pub fn wait<T: TimerInterface>(&mut self, timer: &mut T) -> Result<u64> {
        let period = self.timing.period_us() as u64;
        let now = timer.now_us();
        let mut anchor = self.next_deadline_us.unwrap_or(now);

        if now < anchor {
            let remaining = (anchor - now).min(u32::MAX as u64) as u32;
            timer.delay_us(remaining)?;
        } else if now - anchor >= period {
            self.stats.record_overrun();
            crate::log_debug!(
                "{} behind schedule by {} us, re-anchoring",
                self.timing.name,
                now - anchor
            );
            anchor = now;
        }

        let start = timer.now_us();
        self.next_deadline_us = Some(anchor + period);
        self.previous_start_us = self.tick_start_us.replace(start);
        Ok(start)
    }

    /// Record execution time of the tick started by the last `wait`.
    pub fn finish<T: TimerInterface>(&mut self, timer: &T) {
        let Some(start) = self.tick_start_us else {
            return;
        };
        let execution_us = timer.now_us().saturating_sub(start);
        let period_us = self
            .previous_start_us
            .map_or(self.timing.period_us() as u64, |prev| start - prev);

        let execution_us = execution_us.min(u32::MAX as u64) as u32;
        self.stats.update(
            execution_us,
            period_us.min(u32::MAX as u64) as u32,
            self.timing.period_us(),
            self.timing.budget_us,
        );
        if !self.timing.is_within_budget(execution_us) {
            crate::log_warn!(
                "{} tick took {} us (budget {} us)",
                self.timing.name,
                execution_us,
                self.timing.budget_us
            );
        }
    }
}
