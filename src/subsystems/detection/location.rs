//! Periodic location polling with a staleness bound

use crash_beacon_core::location::{LocationCache, LocationFix};

use crate::devices::traits::LocationSource;

/// Polls a [`LocationSource`] at a fixed interval and caches the fix
///
/// Runs on the sampling loop. Polling is skipped between intervals so a
/// slow source only costs one call per interval.
pub struct LocationTracker {
    source: Box<dyn LocationSource + Send>,
    cache: LocationCache,
    poll_interval_us: u64,
    next_poll_us: u64,
}

impl LocationTracker {
    pub fn new(
        source: Box<dyn LocationSource + Send>,
        staleness_us: u64,
        poll_interval_us: u64,
    ) -> Self {
        Self {
            source,
            cache: LocationCache::new(staleness_us),
            poll_interval_us,
            next_poll_us: 0,
        }
    }

    /// Poll the source if the interval has elapsed
    ///
    /// Returns `true` if the source was polled.
    pub fn update(&mut self, now_us: u64) -> bool {
        if now_us < self.next_poll_us {
            return false;
        }
        self.next_poll_us = now_us.saturating_add(self.poll_interval_us);

        if let Some(fix) = self.source.poll(now_us) {
            let had_fix = self.cache.current(now_us).is_some();
            self.cache.update(fix);
            if !had_fix {
                crate::log_info!("Location fix acquired: {:.6}, {:.6}", fix.latitude, fix.longitude);
            }
        }
        true
    }

    /// Fix still within the staleness bound
    pub fn usable_fix(&self, now_us: u64) -> Option<LocationFix> {
        self.cache.usable(now_us)
    }

    /// Most recent fix with `valid` recomputed for `now_us`
    pub fn last_fix(&self, now_us: u64) -> Option<LocationFix> {
        self.cache.current(now_us)
    }

    pub fn set_staleness(&mut self, staleness_us: u64) {
        self.cache.set_staleness(staleness_us);
    }

    pub fn set_poll_interval(&mut self, poll_interval_us: u64) {
        self.poll_interval_us = poll_interval_us;
    }
}
