//! Location source trait

use crash_beacon_core::location::LocationFix;

/// Anything that can report where the vehicle is
///
/// Implemented by the NMEA receiver driver, the modem's built-in GNSS and
/// the simulated source. Sources differ in latency and precision; callers
/// only rely on the fix timestamp for staleness.
pub trait LocationSource {
    /// Best fix available at `now_us`, or `None` if there has never been one
    ///
    /// A source may return an older fix it still holds; the caller applies
    /// the staleness bound.
    fn poll(&mut self, now_us: u64) -> Option<LocationFix>;
}

impl<L: LocationSource + ?Sized> LocationSource for Box<L> {
    fn poll(&mut self, now_us: u64) -> Option<LocationFix> {
        (**self).poll(now_us)
    }
}
