//! Location fix and staleness-bounded cache.

/// A geographic fix in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Time the fix was obtained (µs since start)
    pub timestamp_us: u64,
    /// Whether the fix is usable for an alert message
    pub valid: bool,
}

impl LocationFix {
    /// A fresh, valid fix.
    pub fn new(latitude: f64, longitude: f64, timestamp_us: u64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp_us,
            valid: true,
        }
    }

    /// Age of the fix at `now_us`.
    pub fn age_us(&self, now_us: u64) -> u64 {
        now_us.saturating_sub(self.timestamp_us)
    }

    /// Whether the fix is older than `staleness_us` at `now_us`.
    pub fn is_stale(&self, now_us: u64, staleness_us: u64) -> bool {
        self.age_us(now_us) > staleness_us
    }
}

/// Holds the most recent fix; each update replaces it wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationCache {
    latest: Option<LocationFix>,
    staleness_us: u64,
}

impl LocationCache {
    pub fn new(staleness_us: u64) -> Self {
        Self {
            latest: None,
            staleness_us,
        }
    }

    /// Replace the cached fix.
    pub fn update(&mut self, fix: LocationFix) {
        self.latest = Some(fix);
    }

    pub fn set_staleness(&mut self, staleness_us: u64) {
        self.staleness_us = staleness_us;
    }

    pub fn staleness_us(&self) -> u64 {
        self.staleness_us
    }

    /// The cached fix with `valid` recomputed for `now_us`.
    pub fn current(&self, now_us: u64) -> Option<LocationFix> {
        self.latest.map(|fix| LocationFix {
            valid: fix.valid && !fix.is_stale(now_us, self.staleness_us),
            ..fix
        })
    }

    /// The cached fix only if it is still valid at `now_us`.
    pub fn usable(&self, now_us: u64) -> Option<LocationFix> {
        self.current(now_us).filter(|fix| fix.valid)
    }
}
