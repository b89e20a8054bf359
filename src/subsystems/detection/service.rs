//! Alert delivery over SMS

use crash_beacon_core::alert::compose_alert_message;
use crash_beacon_core::location::LocationFix;

use super::dispatch::AlertJob;
use crate::devices::modem::{ModemChannel, ModemError, Sim7000};
use crate::devices::traits::LocationSource;

/// Alert delivery errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlertError {
    /// No emergency number configured
    #[error("no emergency phone number configured")]
    NoRecipient,
    /// Modem failed
    #[error(transparent)]
    Modem(#[from] ModemError),
}

/// Where to look for a position when the alert has none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationFallback {
    /// Send "location unknown"
    #[default]
    Disabled,
    /// Ask the modem's GNSS receiver at send time
    ModemGnss,
}

/// Composes the alert text and sends it through the modem
///
/// Owns the modem exclusively; lives wherever the dispatcher runs jobs.
pub struct AlertService<C: ModemChannel> {
    modem: Sim7000<C>,
    phone_number: String,
    fallback: LocationFallback,
    staleness_us: u64,
}

impl<C: ModemChannel> AlertService<C> {
    pub fn new(modem: Sim7000<C>, phone_number: impl Into<String>, staleness_us: u64) -> Self {
        Self {
            modem,
            phone_number: phone_number.into(),
            fallback: LocationFallback::Disabled,
            staleness_us,
        }
    }

    pub fn with_fallback(mut self, fallback: LocationFallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn modem(&self) -> &Sim7000<C> {
        &self.modem
    }

    pub fn modem_mut(&mut self) -> &mut Sim7000<C> {
        &mut self.modem
    }

    /// Initialize the modem and report signal strength
    ///
    /// # Errors
    ///
    /// Returns the modem's initialization error; later sends then fail
    /// fast with `NotInitialized`.
    pub fn prepare(&mut self) -> Result<(), AlertError> {
        self.modem.initialize()?;
        if let Err(err) = self.modem.signal_strength() {
            crate::log_warn!("Signal strength query failed: {}", err);
        }
        Ok(())
    }

    fn locate(&mut self, job: &AlertJob) -> Option<LocationFix> {
        let fix = job.location.filter(|fix| fix.valid);
        if fix.is_some() || self.fallback == LocationFallback::Disabled {
            return fix;
        }
        self.modem
            .poll(job.fired_at_us)
            .filter(|fix| !fix.is_stale(job.fired_at_us, self.staleness_us))
    }

    /// Send one alert; a single attempt
    pub fn deliver(&mut self, job: &AlertJob) -> Result<(), AlertError> {
        if self.phone_number.is_empty() {
            return Err(AlertError::NoRecipient);
        }

        let fix = self.locate(job);
        if fix.is_none() {
            crate::log_warn!("No location fix for incident {}", job.incident.id);
        }
        let message = compose_alert_message(fix.as_ref());
        crate::log_warn!("Sending alert: {}", message.as_str());

        self.modem.send_sms(&self.phone_number, &message)?;
        Ok(())
    }
}
