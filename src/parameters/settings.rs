//! Environment-backed settings

use std::str::FromStr;

use crash_beacon_core::motion::{AccelRange, GyroRange, RangeError};
use crash_beacon_core::parameters::{ConfigError, DetectorConfig, RearmPolicy};

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Settings errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    /// Value could not be parsed
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
    /// Parsed, but outside the detector's bounds
    #[error("invalid configuration: {0}")]
    Config(ConfigError),
}

impl From<ConfigError> for SettingsError {
    fn from(err: ConfigError) -> Self {
        SettingsError::Config(err)
    }
}

impl From<RangeError> for SettingsError {
    fn from(err: RangeError) -> Self {
        SettingsError::Config(err.into())
    }
}

/// Where the location fix comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpsSource {
    /// Dedicated NMEA receiver, polled from the sampling loop
    #[default]
    Receiver,
    /// The modem's built-in GNSS, queried when an alert is sent
    Modem,
    /// No positioning
    Disabled,
}

impl FromStr for GpsSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "receiver" | "gps" => Ok(GpsSource::Receiver),
            "modem" | "sim7000" => Ok(GpsSource::Modem),
            "none" | "off" | "disabled" => Ok(GpsSource::Disabled),
            _ => Err(()),
        }
    }
}

/// Complete runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub detector: DetectorConfig,
    /// Emergency contact for the alert SMS
    pub phone_number: String,
    /// Fail modem initialization on SIM or registration problems
    pub modem_strict: bool,
    pub gps_source: GpsSource,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            phone_number: String::new(),
            modem_strict: false,
            gps_source: GpsSource::default(),
        }
    }
}

fn invalid(key: &'static str, value: &str) -> SettingsError {
    SettingsError::Invalid {
        key,
        value: value.to_string(),
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, SettingsError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_seconds(key: &'static str, value: &str) -> Result<u64, SettingsError> {
    let seconds: f64 = parse(key, value)?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid(key, value));
    }
    Ok((seconds * MICROS_PER_SECOND).round() as u64)
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

impl Settings {
    /// Load settings through `lookup`, starting from defaults
    ///
    /// Unset variables keep their default. The resulting detector
    /// configuration is validated as a whole.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let d = &mut settings.detector;

        if let Some(v) = lookup("ACCEL_RANGE") {
            d.accel_range = AccelRange::try_from(parse::<u16>("ACCEL_RANGE", &v)?)?;
        }
        if let Some(v) = lookup("GYRO_RANGE") {
            d.gyro_range = GyroRange::try_from(parse::<u16>("GYRO_RANGE", &v)?)?;
        }
        if let Some(v) = lookup("SAMPLING_RATE") {
            d.sampling_rate_hz = parse("SAMPLING_RATE", &v)?;
        }
        if let Some(v) = lookup("WINDOW_SIZE") {
            d.window_size = parse("WINDOW_SIZE", &v)?;
        }
        if let Some(v) = lookup("CONFIDENCE_THRESHOLD") {
            d.confidence_threshold = parse("CONFIDENCE_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("ALERT_DELAY") {
            d.alert_delay_us = parse_seconds("ALERT_DELAY", &v)?;
        }
        if let Some(v) = lookup("GPS_STALENESS") {
            d.gps_staleness_us = parse_seconds("GPS_STALENESS", &v)?;
        }
        if let Some(v) = lookup("GPS_POLL_INTERVAL") {
            d.gps_poll_interval_us = parse_seconds("GPS_POLL_INTERVAL", &v)?;
        }
        if let Some(v) = lookup("REARM_AFTER") {
            d.rearm = if v.trim().eq_ignore_ascii_case("manual") {
                RearmPolicy::Manual
            } else {
                RearmPolicy::AfterCooldown {
                    cooldown_us: parse_seconds("REARM_AFTER", &v)?,
                }
            };
        }
        d.validate()?;

        if let Some(v) = lookup("PHONE_NUMBER") {
            settings.phone_number = v.trim().to_string();
        }
        if let Some(v) = lookup("MODEM_STRICT") {
            settings.modem_strict = parse_bool("MODEM_STRICT", &v)?;
        }
        if let Some(v) = lookup("GPS_SOURCE") {
            settings.gps_source = v.parse().map_err(|_| invalid("GPS_SOURCE", &v))?;
        }

        Ok(settings)
    }

    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Settings, SettingsError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = load(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.detector.alert_delay_us, 15_000_000);
        assert_eq!(settings.gps_source, GpsSource::Receiver);
    }

    #[test]
    fn test_full_environment() {
        let settings = load(&[
            ("ACCEL_RANGE", "8"),
            ("GYRO_RANGE", "1000"),
            ("SAMPLING_RATE", "100"),
            ("WINDOW_SIZE", "100"),
            ("CONFIDENCE_THRESHOLD", "0.8"),
            ("ALERT_DELAY", "10"),
            ("GPS_STALENESS", "120"),
            ("GPS_POLL_INTERVAL", "2.5"),
            ("REARM_AFTER", "60"),
            ("PHONE_NUMBER", " +15550100 "),
            ("MODEM_STRICT", "yes"),
            ("GPS_SOURCE", "modem"),
        ])
        .unwrap();

        let d = settings.detector;
        assert_eq!(d.accel_range, AccelRange::G8);
        assert_eq!(d.gyro_range, GyroRange::Dps1000);
        assert_eq!(d.sampling_rate_hz, 100);
        assert_eq!(d.window_size, 100);
        assert_eq!(d.confidence_threshold, 0.8);
        assert_eq!(d.alert_delay_us, 10_000_000);
        assert_eq!(d.gps_staleness_us, 120_000_000);
        assert_eq!(d.gps_poll_interval_us, 2_500_000);
        assert_eq!(d.rearm, RearmPolicy::AfterCooldown { cooldown_us: 60_000_000 });
        assert_eq!(settings.phone_number, "+15550100");
        assert!(settings.modem_strict);
        assert_eq!(settings.gps_source, GpsSource::Modem);
    }

    #[test]
    fn test_unsupported_range_rejected() {
        assert!(matches!(
            load(&[("ACCEL_RANGE", "3")]),
            Err(SettingsError::Config(ConfigError::Range(_)))
        ));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        assert!(matches!(
            load(&[("WINDOW_SIZE", "300")]),
            Err(SettingsError::Config(ConfigError::WindowSize(300)))
        ));
        assert!(matches!(
            load(&[("CONFIDENCE_THRESHOLD", "1.2")]),
            Err(SettingsError::Config(ConfigError::Threshold(_)))
        ));
    }

    #[test]
    fn test_unparseable_values() {
        assert_eq!(
            load(&[("SAMPLING_RATE", "fast")]),
            Err(SettingsError::Invalid {
                key: "SAMPLING_RATE",
                value: "fast".into()
            })
        );
        assert!(load(&[("ALERT_DELAY", "-1")]).is_err());
        assert!(load(&[("MODEM_STRICT", "maybe")]).is_err());
        assert!(load(&[("GPS_SOURCE", "satellite")]).is_err());
    }
}
