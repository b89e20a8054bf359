//! Simulated accident-detection run on the host.
//!
//! Drives the full pipeline in real time against simulated devices: a car
//! idling with engine vibration, an optional frontal impact, a positioning
//! receiver and a scripted SIM7000. Settings come from the environment
//! (see `crash_beacon::parameters`).
//!
//! Usage:
//!   cargo run --bin crash_beacon -- [OPTIONS]
//!
//! Options:
//!   --duration <S>    Run time in seconds (default: 20)
//!   --impact-at <S>   Time of the simulated collision (default: 3)
//!   --no-impact       Do not simulate a collision
//!   --cancel-at <S>   Press the cancel button at this time
//!   --no-model        Run without a classifier (degraded mode)
//!   --inline          Send alerts on the sampling thread

use std::env;
use std::error::Error;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crash_beacon::core::logging;
use crash_beacon::core::traits::StdState;
use crash_beacon::devices::gps::SimulatedLocation;
use crash_beacon::devices::imu::{ImpactProfile, SimulatedMotion};
use crash_beacon::devices::modem::{Sim7000, SimulatedModem};
use crash_beacon::logic::alert::AlertStateMachine;
use crash_beacon::logic::scorer::{ImpactHeuristic, UnavailableClassifier};
use crash_beacon::parameters::{GpsSource, Settings, SettingsError};
use crash_beacon::platform::error::{GpioError, PlatformError};
use crash_beacon::platform::host::StdTimer;
use crash_beacon::platform::mock::MockGpio;
use crash_beacon::platform::traits::{GpioInterface, GpioMode, TimerInterface};
use crash_beacon::platform::Result as PlatformResult;
use crash_beacon::subsystems::detection::{
    self, AlertDispatcher, AlertService, ButtonWatcher, DeliveryWorker, DetectionPipeline,
    InlineDispatcher, LocationFallback, LocationTracker, ModelSelection, StatusIndicator,
    ThreadedDispatcher,
};

/// Simulated vehicle position (New York City)
const SIM_LATITUDE: f64 = 40.7128;
const SIM_LONGITUDE: f64 = -74.0060;

/// Recipient used when `PHONE_NUMBER` is unset
const SIM_RECIPIENT: &str = "+15550100";

/// How long the simulated finger holds the cancel button (µs)
const PRESS_HOLD_US: u64 = 200_000;

/// Pulled-up cancel button that reads low for `PRESS_HOLD_US` from
/// `press_at_us` on the run clock
struct ScriptedButton {
    clock: StdTimer,
    press_at_us: u64,
}

impl GpioInterface for ScriptedButton {
    fn set_high(&mut self) -> PlatformResult<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn set_low(&mut self) -> PlatformResult<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn is_high(&mut self) -> PlatformResult<bool> {
        let now = self.clock.now_us();
        let pressed = now >= self.press_at_us && now < self.press_at_us + PRESS_HOLD_US;
        Ok(!pressed)
    }

    fn mode(&self) -> GpioMode {
        GpioMode::InputPullUp
    }
}

struct Args {
    duration_s: f64,
    impact_at_s: Option<f64>,
    cancel_at_s: Option<f64>,
    no_model: bool,
    inline: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        duration_s: 20.0,
        impact_at_s: Some(3.0),
        cancel_at_s: None,
        no_model: false,
        inline: false,
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--duration" => {
                i += 1;
                args.duration_s = parse_seconds_arg(&raw, i, "duration");
            }
            "--impact-at" => {
                i += 1;
                args.impact_at_s = Some(parse_seconds_arg(&raw, i, "impact-at"));
            }
            "--no-impact" => args.impact_at_s = None,
            "--cancel-at" => {
                i += 1;
                args.cancel_at_s = Some(parse_seconds_arg(&raw, i, "cancel-at"));
            }
            "--no-model" => args.no_model = true,
            "--inline" => args.inline = true,
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    args
}

fn parse_seconds_arg(raw: &[String], i: usize, name: &str) -> f64 {
    let value: f64 = raw
        .get(i)
        .unwrap_or_else(|| {
            eprintln!("Error: --{name} requires a value");
            process::exit(1);
        })
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("Error: invalid value for --{name}");
            process::exit(1);
        });
    if !value.is_finite() || value < 0.0 {
        eprintln!("Error: --{name} must be a non-negative number of seconds");
        process::exit(1);
    }
    value
}

fn print_usage() {
    eprintln!(
        "Usage: crash_beacon [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --duration <S>    Run time in seconds (default: 20)\n\
         \x20 --impact-at <S>   Time of the simulated collision (default: 3)\n\
         \x20 --no-impact       Do not simulate a collision\n\
         \x20 --cancel-at <S>   Press the cancel button at this time\n\
         \x20 --no-model        Run without a classifier (degraded mode)\n\
         \x20 --inline          Send alerts on the sampling thread\n\
         \x20 -h, --help        Show this help"
    );
}

fn micros(seconds: f64) -> u64 {
    (seconds * 1_000_000.0) as u64
}

fn simulate(args: Args, mut settings: Settings) -> Result<(), Box<dyn Error>> {
    let config = settings.detector;
    if settings.phone_number.is_empty() {
        crash_beacon::log_warn!("PHONE_NUMBER not set, sending to {}", SIM_RECIPIENT);
        settings.phone_number = SIM_RECIPIENT.to_string();
    }

    let mut timer = StdTimer::new();
    let machine = Arc::new(StdState::new(AlertStateMachine::from_config(&config)));

    let mut motion = SimulatedMotion::new();
    if let Some(at) = args.impact_at_s {
        motion = motion.with_impact(ImpactProfile::frontal(micros(at)));
    }

    let classifier = if args.no_model {
        ModelSelection::Unavailable(UnavailableClassifier::new(config.window_size))
    } else {
        ModelSelection::Heuristic(ImpactHeuristic::new(config.window_size, config.accel_range))
    };

    let mut modem = SimulatedModem::new();
    if settings.gps_source == GpsSource::Modem {
        modem = modem.with_position(SIM_LATITUDE, SIM_LONGITUDE);
    }
    let modem_log = modem.log();

    let fallback = match settings.gps_source {
        GpsSource::Modem => LocationFallback::ModemGnss,
        GpsSource::Receiver | GpsSource::Disabled => LocationFallback::Disabled,
    };
    let service = AlertService::new(
        Sim7000::new(modem, settings.modem_strict),
        settings.phone_number.clone(),
        config.gps_staleness_us,
    )
    .with_fallback(fallback);
    let worker = DeliveryWorker::new(service, machine.clone());

    let dispatcher: Box<dyn AlertDispatcher> = if args.inline {
        Box::new(InlineDispatcher::new(worker))
    } else {
        Box::new(ThreadedDispatcher::spawn(worker)?)
    };

    let mut pipeline = DetectionPipeline::new(config, motion, classifier, machine, dispatcher)
        .map_err(SettingsError::from)?
        .with_indicator(StatusIndicator::new(Box::new(MockGpio::new_output()))?);

    if settings.gps_source == GpsSource::Receiver {
        let receiver = SimulatedLocation::new(SIM_LATITUDE, SIM_LONGITUDE)
            .with_acquisition_delay(2_000_000);
        pipeline = pipeline.with_location(LocationTracker::new(
            Box::new(receiver),
            config.gps_staleness_us,
            config.gps_poll_interval_us,
        ));
    }

    let stop = Arc::new(AtomicBool::new(false));
    let button = match args.cancel_at_s {
        Some(at) => {
            let pin = ScriptedButton {
                clock: timer,
                press_at_us: micros(at),
            };
            let watcher = ButtonWatcher::new(pin, pipeline.handle().cancel_signal());
            Some(watcher.spawn(timer, stop.clone())?)
        }
        None => None,
    };

    let summary = detection::run(&mut pipeline, &mut timer, Some(micros(args.duration_s)), &stop)?;
    stop.store(true, Ordering::Release);
    let presses = match button {
        Some(handle) => handle.join().unwrap_or_else(|_| {
            crash_beacon::log_error!("Cancel button thread panicked");
            0
        }),
        None => 0,
    };

    // Joins the delivery worker so the log below is complete
    drop(pipeline);

    println!();
    println!("=== crash_beacon summary ===");
    println!("Ticks:         {}", summary.ticks);
    println!("Detections:    {}", summary.detections);
    println!("Button presses: {}", presses);
    println!("Cancellations: {}", summary.cancellations);
    println!("Alerts fired:  {}", summary.alerts_fired);
    println!("Final state:   {}", summary.final_state.name());
    println!("Deadline miss: {}", summary.stats.deadline_misses);
    for message in modem_log.messages() {
        println!("SMS -> {}: {}", settings.phone_number, message);
    }
    Ok(())
}

fn main() {
    let args = parse_args();
    logging::init("info");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = simulate(args, settings) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
