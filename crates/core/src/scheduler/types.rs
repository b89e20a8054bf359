//! Core types for the sampling loop
//!
//! - Loop timing (configuration)
//! - Tick statistics (runtime monitoring)

/// Timing contract for a periodic loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTiming {
    /// Human-readable loop name for logging
    pub name: &'static str,

    /// Target rate in Hz
    pub rate_hz: u32,

    /// Execution time budget in microseconds
    ///
    /// A tick that runs longer than this counts as a deadline miss. It should
    /// be less than the period to leave room for the sleep.
    pub budget_us: u32,
}

impl LoopTiming {
    /// Timing with a budget of 80% of the period.
    pub fn from_rate(name: &'static str, rate_hz: u32) -> Self {
        let rate_hz = rate_hz.max(1);
        Self {
            name,
            rate_hz,
            budget_us: (1_000_000 / rate_hz) / 5 * 4,
        }
    }

    /// Period in microseconds
    #[inline]
    pub const fn period_us(&self) -> u32 {
        1_000_000 / self.rate_hz
    }

    /// Check if execution time is within budget
    #[inline]
    pub const fn is_within_budget(&self, execution_us: u32) -> bool {
        execution_us <= self.budget_us
    }

    /// Check if period deviation is within 5%
    #[inline]
    pub fn is_period_acceptable(&self, actual_period_us: u32) -> bool {
        let target = self.period_us();
        let tolerance = target / 20;
        actual_period_us.abs_diff(target) <= tolerance
    }
}

/// Runtime statistics for the sampling loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Last tick execution time in microseconds
    pub last_execution_us: u32,

    /// Average execution time in microseconds (EMA, alpha = 0.1)
    pub avg_execution_us: u32,

    /// Maximum execution time observed in microseconds
    pub max_execution_us: u32,

    /// Ticks whose execution exceeded the budget
    pub deadline_misses: u32,

    /// Ticks that started after their scheduled deadline had already passed
    pub overruns: u32,

    /// Last measured period in microseconds
    pub last_period_us: u32,

    /// Average absolute deviation from the target period (EMA)
    pub avg_jitter_us: u32,

    /// Total number of ticks
    pub tick_count: u64,
}

impl TickStats {
    /// Update statistics with a new tick measurement
    ///
    /// # Arguments
    ///
    /// * `execution_us` - Duration of the tick in microseconds
    /// * `period_us` - Time since the previous tick started
    /// * `target_period_us` - Expected period
    /// * `budget_us` - Maximum allowed execution time
    pub fn update(
        &mut self,
        execution_us: u32,
        period_us: u32,
        target_period_us: u32,
        budget_us: u32,
    ) {
        self.last_execution_us = execution_us;
        self.last_period_us = period_us;
        self.tick_count = self.tick_count.saturating_add(1);

        // avg_new = (value + 9 * avg_old) / 10
        if self.avg_execution_us == 0 {
            self.avg_execution_us = execution_us;
        } else {
            self.avg_execution_us =
                ((execution_us as u64 + 9 * self.avg_execution_us as u64) / 10) as u32;
        }

        self.max_execution_us = self.max_execution_us.max(execution_us);

        if execution_us > budget_us {
            self.deadline_misses = self.deadline_misses.saturating_add(1);
        }

        let jitter = period_us.abs_diff(target_period_us);
        if self.avg_jitter_us == 0 {
            self.avg_jitter_us = jitter;
        } else {
            self.avg_jitter_us = ((jitter as u64 + 9 * self.avg_jitter_us as u64) / 10) as u32;
        }
    }

    /// Count a tick that started late.
    pub fn record_overrun(&mut self) {
        self.overruns = self.overruns.saturating_add(1);
    }

    /// Reset all statistics to initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
