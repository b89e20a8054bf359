//! GPS device driver (NMEA protocol)
//!
//! # Example
//!
//! ```
//! use crash_beacon::devices::gps::GpsDriver;
//! use crash_beacon::platform::mock::MockUart;
//! use crash_beacon::platform::traits::UartConfig;
//!
//! let mut gps = GpsDriver::new(MockUart::new(UartConfig::default()));
//! gps.uart_mut()
//!     .inject_rx_data(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n");
//!
//! let fix = gps.read_fix(0).unwrap().unwrap();
//! assert!((fix.latitude - 48.1173).abs() < 1e-4);
//! ```

use crash_beacon_core::location::LocationFix;
use nmea0183::{ParseResult, Parser};

use crate::devices::traits::LocationSource;
use crate::platform::{traits::UartInterface, Result};

/// Bytes pulled from the UART per read call
const CHUNK_LEN: usize = 64;

/// Guard against a receive stream that never drains (32 KiB, over 30 s of
/// 9600 baud output)
const MAX_CHUNKS_PER_POLL: usize = 512;

/// GPS device driver
///
/// Generic over any `UartInterface`. Position comes from GGA, or from RMC
/// when the receiver reports an active fix. Sentences that fail to parse
/// are skipped.
pub struct GpsDriver<U: UartInterface> {
    uart: U,
    parser: Parser,
    last_fix: Option<LocationFix>,
    rejected: u32,
}

impl<U: UartInterface> GpsDriver<U> {
    /// Create a new GPS driver
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            parser: Parser::new(),
            last_fix: None,
            rejected: 0,
        }
    }

    /// Get mutable reference to UART interface
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Drain everything buffered and return the newest fix
    ///
    /// The whole backlog is consumed so the fix reflects the latest
    /// sentence, which is stamped with `now_us`. If nothing new parses the
    /// previous fix is returned unchanged, so callers see its original
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if UART communication fails.
    pub fn read_fix(&mut self, now_us: u64) -> Result<Option<LocationFix>> {
        let mut buf = [0u8; CHUNK_LEN];

        for _ in 0..MAX_CHUNKS_PER_POLL {
            if !self.uart.available() {
                break;
            }
            let count = self.uart.read(&mut buf)?;
            if count == 0 {
                break;
            }

            for &byte in buf.iter().take(count) {
                let Some(result) = self.parser.parse_from_byte(byte) else {
                    continue;
                };
                let position = match result {
                    Ok(ParseResult::GGA(Some(gga))) => {
                        Some((gga.latitude.as_f64(), gga.longitude.as_f64()))
                    }
                    Ok(ParseResult::RMC(Some(rmc))) => {
                        Some((rmc.latitude.as_f64(), rmc.longitude.as_f64()))
                    }
                    Ok(_) => None,
                    Err(reason) => {
                        self.rejected = self.rejected.wrapping_add(1);
                        crate::log_debug!("Skipping NMEA sentence: {}", reason);
                        None
                    }
                };
                if let Some((lat, lon)) = position {
                    self.last_fix = Some(LocationFix::new(lat, lon, now_us));
                }
            }
        }

        Ok(self.last_fix)
    }

    /// Last decoded fix without touching the UART
    pub fn current_fix(&self) -> Option<LocationFix> {
        self.last_fix
    }

    /// Number of sentences rejected by the parser
    pub fn rejected_sentences(&self) -> u32 {
        self.rejected
    }
}

impl<U: UartInterface> LocationSource for GpsDriver<U> {
    fn poll(&mut self, now_us: u64) -> Option<LocationFix> {
        match self.read_fix(now_us) {
            Ok(fix) => fix,
            Err(err) => {
                crate::log_warn!("GPS read failed: {}", err);
                self.last_fix
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockUart;
    use crate::platform::traits::UartConfig;
    use approx::assert_relative_eq;

    const MUNICH: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
    const SYDNEY_WEST: &[u8] =
        b"$GPGGA,123519,3351.600,S,15112.600,W,1,08,0.9,545.4,M,46.9,M,,*48\r\n";

    fn gps() -> GpsDriver<MockUart> {
        GpsDriver::new(MockUart::new(UartConfig::default()))
    }

    #[test]
    fn test_gpgga_degrees_minutes_conversion() {
        let mut gps = gps();
        gps.uart_mut().inject_rx_data(MUNICH);

        let fix = gps.read_fix(5_000).unwrap().expect("fix");
        assert_relative_eq!(fix.latitude, 48.1173, epsilon = 1e-6);
        assert_relative_eq!(fix.longitude, 11.516_667, epsilon = 1e-6);
        assert_eq!(fix.timestamp_us, 5_000);
        assert!(fix.valid);
    }

    #[test]
    fn test_south_and_west_are_negative() {
        let mut gps = gps();
        gps.uart_mut().inject_rx_data(SYDNEY_WEST);

        let fix = gps.read_fix(0).unwrap().expect("fix");
        assert_relative_eq!(fix.latitude, -33.86, epsilon = 1e-6);
        assert_relative_eq!(fix.longitude, -151.21, epsilon = 1e-6);
    }

    #[test]
    fn test_rmc_active_fix_accepted() {
        let mut gps = gps();
        gps.uart_mut().inject_rx_data(
            b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n",
        );

        let fix = gps.read_fix(0).unwrap().expect("fix");
        assert_relative_eq!(fix.latitude, 48.1173, epsilon = 1e-6);
    }

    #[test]
    fn test_no_data_no_fix() {
        let mut gps = gps();
        assert!(gps.read_fix(0).unwrap().is_none());
        assert!(gps.poll(0).is_none());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let mut gps = gps();
        gps.uart_mut().inject_rx_data(b"INVALID DATA\r\n");
        gps.uart_mut().inject_rx_data(b"$GPGGA,garbage*00\r\n");
        gps.uart_mut().inject_rx_data(MUNICH);

        let fix = gps.read_fix(0).unwrap().expect("fix");
        assert_relative_eq!(fix.latitude, 48.1173, epsilon = 1e-6);
    }

    #[test]
    fn test_last_fix_retained_when_nothing_new() {
        let mut gps = gps();
        gps.uart_mut().inject_rx_data(MUNICH);
        gps.read_fix(1_000).unwrap();

        gps.uart_mut().inject_rx_data(b"$GPGSV,garbage\r\n");
        let fix = gps.poll(9_000).expect("retained fix");
        assert_eq!(fix.timestamp_us, 1_000);
        assert_eq!(gps.current_fix(), Some(fix));
    }

    #[test]
    fn test_newer_sentence_replaces_fix() {
        let mut gps = gps();
        gps.uart_mut().inject_rx_data(MUNICH);
        gps.read_fix(1_000).unwrap();
        gps.uart_mut().inject_rx_data(SYDNEY_WEST);

        let fix = gps.poll(2_000).unwrap();
        assert_relative_eq!(fix.latitude, -33.86, epsilon = 1e-6);
        assert_eq!(fix.timestamp_us, 2_000);
    }

    #[test]
    fn test_poll_drains_full_backlog() {
        let mut gps = gps();
        // ten seconds of 9600 baud output, newest position last
        for _ in 0..140 {
            gps.uart_mut().inject_rx_data(MUNICH);
        }
        gps.uart_mut().inject_rx_data(SYDNEY_WEST);

        let fix = gps.poll(10_000_000).unwrap();
        assert_relative_eq!(fix.latitude, -33.86, epsilon = 1e-6);
        assert!(!gps.uart_mut().available());
    }
}
