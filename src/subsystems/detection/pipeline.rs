//! One sampling period of the detection loop

use std::sync::Arc;

use crash_beacon_core::alert::{AlertAction, AlertState, AlertStateMachine, CancelSignal};
use crash_beacon_core::motion::Sample;
use crash_beacon_core::parameters::{ConfigError, DetectorConfig};
use crash_beacon_core::scorer::{Classifier, Scorer, Verdict};
use crash_beacon_core::window::WindowBuffer;

use super::dispatch::{AlertDispatcher, AlertJob};
use super::indicator::StatusIndicator;
use super::location::LocationTracker;
use crate::core::traits::{SharedState, StdState};
use crate::devices::traits::MotionSource;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub now_us: u64,
    /// Sample read from the sensor (false: substituted)
    pub sample_ok: bool,
    /// Scorer output, if the window was full and the model answered
    pub verdict: Option<Verdict>,
    pub action: AlertAction,
    /// State after the tick
    pub state: AlertState,
    /// Sensor in hard fault
    pub sensor_fault: bool,
}

/// Cloneable handle to the shared alert state
///
/// Handed to anything outside the loop that needs to observe the state or
/// request a cancel.
#[derive(Clone)]
pub struct AlertHandle {
    machine: Arc<StdState<AlertStateMachine>>,
    cancel: Arc<CancelSignal>,
}

impl AlertHandle {
    pub fn state(&self) -> AlertState {
        self.machine.with(|m| m.state())
    }

    /// Raise the cancel flag; applied on the loop's next tick
    pub fn request_cancel(&self) {
        self.cancel.request();
    }

    /// Return to `Idle` from `Sent` or `Cancelled`
    pub fn reset(&self) -> bool {
        self.machine.with_mut(|m| m.reset())
    }

    pub fn cancel_signal(&self) -> Arc<CancelSignal> {
        self.cancel.clone()
    }

    pub fn machine(&self) -> Arc<StdState<AlertStateMachine>> {
        self.machine.clone()
    }
}

/// Sensor ingestion, windowing, scoring and alert advancement
///
/// Every step of a tick completes before the next sample is read. Nothing
/// in a tick blocks except a synchronous dispatcher.
pub struct DetectionPipeline<M, C, D>
where
    M: MotionSource,
    C: Classifier,
    D: AlertDispatcher,
{
    config: DetectorConfig,
    motion: M,
    window: WindowBuffer,
    scorer: Scorer<C>,
    machine: Arc<StdState<AlertStateMachine>>,
    cancel: Arc<CancelSignal>,
    dispatcher: D,
    location: Option<LocationTracker>,
    indicator: Option<StatusIndicator>,
    last_sample: Option<Sample>,
    consecutive_faults: u32,
    sensor_fault: bool,
    degraded_logged: bool,
}

impl<M, C, D> DetectionPipeline<M, C, D>
where
    M: MotionSource,
    C: Classifier,
    D: AlertDispatcher,
{
    /// Build a pipeline around an existing shared state machine
    ///
    /// The dispatcher usually holds a clone of `machine` so it can record
    /// delivery results.
    ///
    /// # Errors
    ///
    /// Returns the first configuration bound violated, or
    /// `ConfigError::WindowMismatch` if a loaded model cannot score windows
    /// of `config.window_size` samples.
    pub fn new(
        config: DetectorConfig,
        motion: M,
        mut classifier: C,
        machine: Arc<StdState<AlertStateMachine>>,
        dispatcher: D,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        check_model(&classifier, &config)?;
        let window = WindowBuffer::new(config.window_size, config.accel_range, config.gyro_range)?;
        classifier.reconfigure(config.window_size, config.accel_range);
        let scorer = Scorer::new(classifier, config.confidence_threshold);
        machine.with_mut(|m| m.apply_config(&config));

        let info = scorer.model_info();
        if info.loaded {
            crate::log_info!(
                "Model loaded: input (1, {}, {}), threshold {}",
                info.input_shape.timesteps,
                info.input_shape.features,
                info.threshold
            );
        } else {
            crate::log_warn!("Model unavailable, detection disabled");
        }

        Ok(Self {
            config,
            motion,
            window,
            scorer,
            machine,
            cancel: Arc::new(CancelSignal::new()),
            dispatcher,
            location: None,
            indicator: None,
            last_sample: None,
            consecutive_faults: 0,
            sensor_fault: false,
            degraded_logged: !info.loaded,
        })
    }

    pub fn with_location(mut self, tracker: LocationTracker) -> Self {
        self.location = Some(tracker);
        self
    }

    pub fn with_indicator(mut self, indicator: StatusIndicator) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Share an externally created cancel signal (e.g. with a button thread)
    pub fn with_cancel_signal(mut self, cancel: Arc<CancelSignal>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn handle(&self) -> AlertHandle {
        AlertHandle {
            machine: self.machine.clone(),
            cancel: self.cancel.clone(),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn state(&self) -> AlertState {
        self.machine.with(|m| m.state())
    }

    pub fn window(&self) -> &WindowBuffer {
        &self.window
    }

    pub fn scorer(&self) -> &Scorer<C> {
        &self.scorer
    }

    pub fn scorer_mut(&mut self) -> &mut Scorer<C> {
        &mut self.scorer
    }

    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    pub fn indicator_lit(&self) -> bool {
        self.indicator.as_ref().is_some_and(|i| i.is_lit())
    }

    pub fn sensor_fault(&self) -> bool {
        self.sensor_fault
    }

    /// Change the confidence threshold; values outside [0, 1] are ignored
    pub fn set_threshold(&mut self, threshold: f32) -> bool {
        let accepted = self.scorer.set_threshold(threshold);
        if accepted {
            self.config.confidence_threshold = threshold;
            crate::log_info!("Confidence threshold set to {}", threshold);
        } else {
            crate::log_warn!("Rejected confidence threshold {}", threshold);
        }
        accepted
    }

    /// Replace the whole configuration
    ///
    /// The window is rebuilt (and refills) only if its size or the sensor
    /// ranges changed; the classifier follows the new size and range. A
    /// running countdown keeps its deadline. On error nothing changes.
    pub fn apply_config(&mut self, config: DetectorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        check_model(self.scorer.classifier(), &config)?;

        if config.window_size != self.config.window_size
            || config.accel_range != self.config.accel_range
            || config.gyro_range != self.config.gyro_range
        {
            self.window =
                WindowBuffer::new(config.window_size, config.accel_range, config.gyro_range)?;
            self.scorer
                .classifier_mut()
                .reconfigure(config.window_size, config.accel_range);
        }
        self.scorer.set_threshold(config.confidence_threshold);
        self.machine.with_mut(|m| m.apply_config(&config));
        if let Some(tracker) = self.location.as_mut() {
            tracker.set_staleness(config.gps_staleness_us);
            tracker.set_poll_interval(config.gps_poll_interval_us);
        }

        self.config = config;
        crate::log_info!("Detector configuration updated");
        Ok(())
    }

    /// Return the alert to `Idle` from `Sent` or `Cancelled`
    pub fn reset(&mut self) -> bool {
        let reset = self.machine.with_mut(|m| m.reset());
        if reset {
            crate::log_info!("Alert state reset");
        }
        self.refresh_indicator();
        reset
    }

    fn read_sample(&mut self, now_us: u64) -> (Sample, bool) {
        match self.motion.read_sample(now_us) {
            Ok(sample) => {
                if self.sensor_fault {
                    crate::log_info!(
                        "Motion sensor recovered after {} failed reads",
                        self.consecutive_faults
                    );
                }
                self.consecutive_faults = 0;
                self.sensor_fault = false;
                self.last_sample = Some(sample);
                (sample, true)
            }
            Err(err) => {
                self.consecutive_faults = self.consecutive_faults.saturating_add(1);
                if self.consecutive_faults >= self.config.sensor_fault_threshold {
                    if !self.sensor_fault {
                        crate::log_error!(
                            "Motion sensor fault: {} consecutive failures ({})",
                            self.consecutive_faults,
                            err
                        );
                    }
                    self.sensor_fault = true;
                } else {
                    crate::log_warn!("Sensor read failed: {}", err);
                }
                let substitute = self
                    .last_sample
                    .map_or_else(|| Sample::zeroed(now_us), |s| s.restamped(now_us));
                (substitute, false)
            }
        }
    }

    fn evaluate(&mut self) -> Option<Verdict> {
        if self.sensor_fault {
            return None;
        }
        let block = self.window.snapshot_normalized()?;
        let verdict = self.scorer.evaluate(&block);
        if verdict.is_none() && !self.degraded_logged {
            crate::log_warn!("Scorer produced no verdict, detection suppressed");
            self.degraded_logged = true;
        }
        verdict
    }

    fn refresh_indicator(&mut self) {
        let state = self.state();
        if let Some(indicator) = self.indicator.as_mut() {
            if let Err(err) = indicator.show(&state) {
                crate::log_warn!("Status indicator write failed: {}", err);
            }
        }
    }

    /// Run one sampling period at `now_us`
    pub fn tick(&mut self, now_us: u64) -> TickReport {
        let (sample, sample_ok) = self.read_sample(now_us);
        self.window.push(sample);

        let verdict = self.evaluate();

        if let Some(tracker) = self.location.as_mut() {
            tracker.update(now_us);
        }

        let cancel_requested = self.cancel.take();
        let (action, state) = self.machine.with_mut(|m| {
            let action = m.step(now_us, verdict, cancel_requested);
            (action, m.state())
        });

        match action {
            AlertAction::Armed(incident) => {
                let peak = self.window.statistics().map_or(0.0, |s| s.peak_accel_g);
                crate::log_warn!(
                    "Accident detected (incident {}, confidence {:.2}, peak {:.2} g); alert in {} s unless cancelled",
                    incident.id,
                    incident.confidence,
                    peak,
                    self.config.alert_delay_us / 1_000_000
                );
            }
            AlertAction::Cancelled(incident) => {
                crate::log_info!("Alert for incident {} cancelled", incident.id);
            }
            AlertAction::Fire(incident) => {
                crate::log_warn!("Alert countdown expired for incident {}", incident.id);
                let location = self
                    .location
                    .as_ref()
                    .and_then(|tracker| tracker.usable_fix(now_us));
                self.dispatcher.dispatch(AlertJob {
                    incident,
                    fired_at_us: now_us,
                    location,
                });
            }
            AlertAction::Rearmed => crate::log_info!("Cooldown elapsed, detection re-armed"),
            AlertAction::None => {}
        }

        self.refresh_indicator();

        TickReport {
            now_us,
            sample_ok,
            verdict,
            action,
            state,
            sensor_fault: self.sensor_fault,
        }
    }
}

/// A loaded model must accept the configured window length
fn check_model<C: Classifier>(classifier: &C, config: &DetectorConfig) -> Result<(), ConfigError> {
    if classifier.is_loaded() && !classifier.accepts_window(config.window_size) {
        return Err(ConfigError::WindowMismatch {
            window: config.window_size,
            model: classifier.input_shape().timesteps,
        });
    }
    Ok(())
}
