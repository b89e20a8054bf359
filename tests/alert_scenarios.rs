//! End-to-end alert scenarios on simulated and mocked devices.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use crash_beacon::core::traits::{SharedState, StdState};
use crash_beacon::devices::gps::{GpsDriver, SimulatedLocation};
use crash_beacon::devices::imu::{ImpactProfile, Mpu6050, Mpu6050Config, SimulatedMotion};
use crash_beacon::devices::traits::MotionSource;
use crash_beacon::devices::modem::{AtChannel, ModemLog, Sim7000, SimulatedModem};
use crash_beacon::logic::alert::{AlertAction, AlertState, AlertStateMachine, Delivery};
use crash_beacon::logic::modem::parse_signal_quality;
use crash_beacon::logic::parameters::{DetectorConfig, RearmPolicy};
use crash_beacon::logic::scorer::{FixedClassifier, ImpactHeuristic, UnavailableClassifier};
use crash_beacon::devices::imu::mpu6050::registers;
use crash_beacon::platform::host::{HalI2c, IoUart};
use crash_beacon::platform::mock::{MockI2c, MockTimer, MockUart};
use crash_beacon::platform::traits::UartConfig;
use crash_beacon::subsystems::detection::{
    run, AlertService, DeliveryWorker, DetectionPipeline, InlineDispatcher, LocationTracker,
    ThreadedDispatcher,
};

const PERIOD_US: u64 = 20_000;
const PHONE: &str = "+15550100";

type SimPipeline =
    DetectionPipeline<SimulatedMotion, FixedClassifier, InlineDispatcher<SimulatedModem>>;

fn machine(config: &DetectorConfig) -> Arc<StdState<AlertStateMachine>> {
    Arc::new(StdState::new(AlertStateMachine::from_config(config)))
}

fn inline_worker(
    modem: SimulatedModem,
    machine: &Arc<StdState<AlertStateMachine>>,
) -> InlineDispatcher<SimulatedModem> {
    let service = AlertService::new(Sim7000::new(modem, false), PHONE, 300_000_000);
    InlineDispatcher::new(DeliveryWorker::new(service, machine.clone()))
}

/// Window 50, threshold 0.7, classifier stub starting at 0.1
fn scenario_pipeline(config: DetectorConfig) -> (SimPipeline, ModemLog) {
    let modem = SimulatedModem::new();
    let log = modem.log();
    let machine = machine(&config);
    let pipeline = DetectionPipeline::new(
        config,
        SimulatedMotion::new().with_vibration(0.0),
        FixedClassifier::new(config.window_size, 0.1),
        machine.clone(),
        inline_worker(modem, &machine),
    )
    .unwrap();
    (pipeline, log)
}

/// Feed 50 normal samples, then one tick at confidence 0.95. Returns the
/// arming time.
fn arm(pipeline: &mut SimPipeline) -> u64 {
    for i in 0..50 {
        let report = pipeline.tick(i * PERIOD_US);
        assert!(report.state.is_idle());
    }
    assert!(pipeline.window().is_full());

    pipeline.scorer_mut().classifier_mut().set_confidence(0.95);
    let now = 50 * PERIOD_US;
    let report = pipeline.tick(now);
    assert!(matches!(report.action, AlertAction::Armed(_)));
    now
}

#[test]
fn normal_driving_stays_idle() {
    let (mut pipeline, log) = scenario_pipeline(DetectorConfig::default());
    for i in 0..50 {
        let report = pipeline.tick(i * PERIOD_US);
        assert!(report.state.is_idle());
    }
    let report = pipeline.tick(50 * PERIOD_US);
    let verdict = report.verdict.unwrap();
    assert!(!verdict.is_event);
    assert_eq!(verdict.confidence, 0.1);
    assert!(report.state.is_idle());
    assert_eq!(log.sms_commands(), 0);
}

#[test]
fn detection_arms_with_fifteen_second_deadline() {
    let (mut pipeline, _log) = scenario_pipeline(DetectorConfig::default());
    let armed_at = arm(&mut pipeline);

    match pipeline.state() {
        AlertState::Pending {
            deadline_us,
            incident,
        } => {
            assert_eq!(deadline_us, armed_at + 15_000_000);
            assert_eq!(incident.confidence, 0.95);
        }
        other => panic!("expected Pending, got {other:?}"),
    }

    // repeated detections neither re-arm nor move the deadline
    for k in 1..=10 {
        let report = pipeline.tick(armed_at + k * PERIOD_US);
        assert_eq!(report.action, AlertAction::None);
    }
    assert!(matches!(
        pipeline.state(),
        AlertState::Pending { deadline_us, .. } if deadline_us == armed_at + 15_000_000
    ));
}

#[test]
fn uncancelled_countdown_sends_sms() {
    let (mut pipeline, log) = scenario_pipeline(DetectorConfig::default());
    let armed_at = arm(&mut pipeline);

    let report = pipeline.tick(armed_at + 16_000_000);
    assert!(matches!(report.action, AlertAction::Fire(_)));
    assert!(matches!(
        pipeline.state(),
        AlertState::Sent {
            delivery: Delivery::Delivered,
            ..
        }
    ));
    assert_eq!(log.sms_commands(), 1);
    assert!(log.commands().contains(&format!("AT+CMGS=\"{PHONE}\"")));
    assert_eq!(
        log.messages(),
        vec!["EMERGENCY: Car accident detected! Location unknown.".to_string()]
    );

    // cannot fire twice
    for k in 1..100 {
        pipeline.tick(armed_at + 16_000_000 + k * PERIOD_US);
    }
    assert_eq!(log.sms_commands(), 1);
}

#[test]
fn cancel_before_deadline_suppresses_sms() {
    let (mut pipeline, log) = scenario_pipeline(DetectorConfig::default());
    let armed_at = arm(&mut pipeline);

    pipeline.tick(armed_at + 5_000_000);
    pipeline.handle().request_cancel();
    let report = pipeline.tick(armed_at + 5_020_000);
    assert!(matches!(report.action, AlertAction::Cancelled(_)));
    assert!(pipeline.state().is_cancelled());

    pipeline.tick(armed_at + 16_000_000);
    assert!(pipeline.state().is_cancelled());
    assert_eq!(log.sms_commands(), 0);
}

#[test]
fn cancel_first_seen_on_deadline_tick_still_sends() {
    let (mut pipeline, log) = scenario_pipeline(DetectorConfig::default());
    let armed_at = arm(&mut pipeline);

    pipeline.handle().request_cancel();
    let report = pipeline.tick(armed_at + 15_000_000);
    assert!(matches!(report.action, AlertAction::Fire(_)));
    assert!(pipeline.state().is_sent());
    assert_eq!(log.sms_commands(), 1);

    // the late request is consumed, not replayed on a later tick
    pipeline.tick(armed_at + 15_020_000);
    assert!(pipeline.state().is_sent());
}

#[test]
fn cancel_outside_pending_is_ignored() {
    let (mut pipeline, log) = scenario_pipeline(DetectorConfig::default());
    pipeline.handle().request_cancel();
    pipeline.tick(0);
    assert!(pipeline.state().is_idle());

    let armed_at = arm(&mut pipeline);
    pipeline.tick(armed_at + 15_000_000);
    pipeline.handle().request_cancel();
    pipeline.tick(armed_at + 15_020_000);
    assert!(pipeline.state().is_sent());
    assert_eq!(log.sms_commands(), 1);
}

#[test]
fn manual_reset_and_cooldown_rearm() {
    let (mut pipeline, log) = scenario_pipeline(DetectorConfig::default());
    let armed_at = arm(&mut pipeline);
    pipeline.tick(armed_at + 15_000_000);
    assert!(pipeline.state().is_sent());

    // manual policy: stays Sent despite continued detections
    pipeline.tick(armed_at + 100_000_000);
    assert!(pipeline.state().is_sent());
    assert!(pipeline.handle().reset());
    let report = pipeline.tick(armed_at + 100_020_000);
    assert!(matches!(report.action, AlertAction::Armed(_)));

    let config = DetectorConfig {
        rearm: RearmPolicy::AfterCooldown {
            cooldown_us: 60_000_000,
        },
        ..DetectorConfig::default()
    };
    let (mut pipeline, _) = scenario_pipeline(config);
    let armed_at = arm(&mut pipeline);
    let fired_at = armed_at + 15_000_000;
    pipeline.tick(fired_at);
    pipeline.tick(fired_at + 59_000_000);
    assert!(pipeline.state().is_sent());

    let report = pipeline.tick(fired_at + 60_000_000);
    assert_eq!(report.action, AlertAction::Rearmed);
    let report = pipeline.tick(fired_at + 60_020_000);
    assert!(matches!(report.action, AlertAction::Armed(_)));
    assert_eq!(log.sms_commands(), 1);
}

#[test]
fn model_unavailable_never_arms() {
    let config = DetectorConfig::default();
    let machine = machine(&config);
    let modem = SimulatedModem::new();
    let log = modem.log();
    let mut pipeline = DetectionPipeline::new(
        config,
        SimulatedMotion::new().with_impact(ImpactProfile::frontal(1_000_000)),
        UnavailableClassifier::new(config.window_size),
        machine.clone(),
        inline_worker(modem, &machine),
    )
    .unwrap();

    assert!(!pipeline.scorer().model_info().loaded);
    for i in 0..2_000 {
        let report = pipeline.tick(i * PERIOD_US);
        assert!(report.verdict.is_none());
        assert!(report.state.is_idle());
    }
    assert_eq!(log.sms_commands(), 0);
}

#[test]
fn simulated_impact_sends_location_through_worker_thread() {
    let config = DetectorConfig::default();
    let machine = machine(&config);
    let modem = SimulatedModem::new();
    let log = modem.log();
    let service = AlertService::new(Sim7000::new(modem, true), PHONE, config.gps_staleness_us);
    let dispatcher =
        ThreadedDispatcher::spawn(DeliveryWorker::new(service, machine.clone())).unwrap();

    let mut pipeline = DetectionPipeline::new(
        config,
        SimulatedMotion::new().with_impact(ImpactProfile::frontal(3_000_000)),
        ImpactHeuristic::new(config.window_size, config.accel_range),
        machine.clone(),
        dispatcher,
    )
    .unwrap()
    .with_location(LocationTracker::new(
        Box::new(SimulatedLocation::new(40.7128, -74.006).with_acquisition_delay(1_000_000)),
        config.gps_staleness_us,
        config.gps_poll_interval_us,
    ));

    let stop = AtomicBool::new(false);
    let summary = run(&mut pipeline, &mut MockTimer::new(), Some(20_000_000), &stop).unwrap();
    assert_eq!(summary.detections, 1);
    assert_eq!(summary.alerts_fired, 1);

    drop(pipeline);
    assert_eq!(
        log.messages(),
        vec![
            "EMERGENCY: Car accident detected! Location: https://www.google.com/maps?q=40.712800,-74.006000"
                .to_string()
        ]
    );
    assert!(machine.with(|m| matches!(
        m.state(),
        AlertState::Sent {
            delivery: Delivery::Delivered,
            ..
        }
    )));
}

#[test]
fn at_modem_over_uart_full_exchange() {
    let config = DetectorConfig::default();
    let machine = machine(&config);

    let mut uart = MockUart::new(UartConfig::default());
    for reply in [
        &b"\r\nOK\r\n"[..],
        b"\r\nOK\r\n",
        b"\r\nOK\r\n",
        b"\r\nOK\r\n",
        b"\r\n+CPIN: READY\r\n\r\nOK\r\n",
        b"\r\n+CREG: 0,1\r\n\r\nOK\r\n",
        b"\r\n+CSQ: 15,0\r\n\r\nOK\r\n",
        b"\r\n> ",
        b"\r\n+CMGS: 7\r\n\r\nOK\r\n",
    ] {
        uart.queue_reply(reply);
    }
    let modem = Sim7000::new(AtChannel::new(uart, MockTimer::new()), true);
    let service = AlertService::new(modem, PHONE, config.gps_staleness_us);
    let dispatcher = InlineDispatcher::new(DeliveryWorker::new(service, machine.clone()));

    let mut pipeline = DetectionPipeline::new(
        config,
        SimulatedMotion::new(),
        FixedClassifier::new(config.window_size, 0.95),
        machine,
        dispatcher,
    )
    .unwrap();

    for i in 0..50 {
        pipeline.tick(i * PERIOD_US);
    }
    pipeline.tick(16_000_000);
    assert!(matches!(
        pipeline.state(),
        AlertState::Sent {
            delivery: Delivery::Delivered,
            ..
        }
    ));

    let sim = pipeline.dispatcher().worker().service().modem();
    assert!(sim.is_initialized());
    let tx = sim.channel().uart().tx_text();
    assert!(tx.contains("AT+CSQ\r\n"));
    assert!(tx.contains("AT+CMGS=\"+15550100\"\r\n"));
    assert!(tx.ends_with("EMERGENCY: Car accident detected! Location unknown.\u{1a}"));
}

#[test]
fn signal_strength_scenario() {
    let mut uart = MockUart::new(UartConfig::default());
    for reply in [&b"OK"[..], b"OK", b"OK", b"OK", b"READY", b"+CREG: 0,1"] {
        uart.queue_reply(reply);
    }
    uart.queue_reply(b"\r\n+CSQ: 15,0\r\n\r\nOK\r\n");
    let mut modem = Sim7000::new(AtChannel::new(uart, MockTimer::new()), true);
    modem.initialize().unwrap();

    assert_eq!(modem.signal_strength(), Ok(Some(-113 + 2 * 15)));
    assert_eq!(parse_signal_quality(""), None);
    assert_eq!(parse_signal_quality("+CSQ: abc,0"), None);
    assert_eq!(parse_signal_quality("+CSQ:"), None);
}

#[test]
fn gps_receiver_feeds_tracker() {
    let mut gps = GpsDriver::new(MockUart::new(UartConfig::default()));
    gps.uart_mut().inject_rx_data(
        b"$GPGGA,123519,3351.600,S,15112.600,W,1,08,0.9,545.4,M,46.9,M,,*48\r\n",
    );
    let mut tracker = LocationTracker::new(Box::new(gps), 300_000_000, 10_000_000);
    tracker.update(1_000);

    let fix = tracker.usable_fix(1_000).unwrap();
    assert!((fix.latitude + 33.86).abs() < 1e-6);
    assert!((fix.longitude + 151.21).abs() < 1e-6);
    assert!(tracker.usable_fix(301_000_001).is_none());
}

/// One ACCEL_XOUT_H burst: level and still, 1 g on Z at ±2 g
const LEVEL_BURST: [u8; 14] = [0, 0, 0, 0, 0x40, 0x00, 0, 0, 0, 0, 0, 0, 0, 0];

#[test]
fn register_sensor_faults_and_recovers() {
    let config = DetectorConfig {
        window_size: 10,
        ..DetectorConfig::default()
    };
    let mut i2c = MockI2c::new();
    i2c.queue_read_data(&[0x68]);
    let imu = Mpu6050::new(i2c, MockTimer::new(), Mpu6050Config::default()).unwrap();

    let machine = machine(&config);
    let modem = SimulatedModem::new();
    let log = modem.log();
    let mut pipeline = DetectionPipeline::new(
        config,
        imu,
        FixedClassifier::new(config.window_size, 0.1),
        machine.clone(),
        inline_worker(modem, &machine),
    )
    .unwrap();

    let mut now = 0;
    for _ in 0..10 {
        pipeline.motion_mut().bus_mut().queue_read_data(&LEVEL_BURST);
        let report = pipeline.tick(now);
        assert!(report.sample_ok);
        now += PERIOD_US;
    }
    assert_eq!(pipeline.window().latest().unwrap().accel.z, 1.0);

    // failed reads keep the loop going on the last good sample
    pipeline.motion_mut().bus_mut().fail_next(config.sensor_fault_threshold);
    for failure in 1..config.sensor_fault_threshold {
        let report = pipeline.tick(now);
        assert!(!report.sample_ok);
        assert!(!report.sensor_fault, "fault raised after {failure} failures");
        assert!(report.verdict.is_some());
        let latest = pipeline.window().latest().unwrap();
        assert_eq!(latest.accel.z, 1.0);
        assert_eq!(latest.timestamp_us, now);
        now += PERIOD_US;
    }
    assert!(!pipeline.motion_mut().is_healthy());

    let report = pipeline.tick(now);
    assert!(report.sensor_fault);
    assert!(report.verdict.is_none());
    assert!(pipeline.sensor_fault());
    now += PERIOD_US;

    pipeline.motion_mut().bus_mut().queue_read_data(&LEVEL_BURST);
    let report = pipeline.tick(now);
    assert!(report.sample_ok);
    assert!(!report.sensor_fault);
    assert!(report.verdict.is_some());
    assert!(pipeline.motion_mut().is_healthy());

    assert!(pipeline.state().is_idle());
    assert_eq!(log.sms_commands(), 0);
}

/// MPU-6050 register file behind an `embedded-hal` bus, lying level
struct LevelImuBus {
    registers: [u8; 128],
    pointer: usize,
}

impl LevelImuBus {
    fn new() -> Self {
        let mut file = [0u8; 128];
        file[registers::WHO_AM_I as usize] = registers::MPU6050_WHO_AM_I_VALUE;
        // ACCEL_ZOUT_H: 0x4000 counts, 1 g at ±2 g
        file[registers::ACCEL_XOUT_H as usize + 4] = 0x40;
        Self {
            registers: file,
            pointer: 0,
        }
    }
}

impl embedded_hal::i2c::ErrorType for LevelImuBus {
    type Error = embedded_hal::i2c::ErrorKind;
}

impl embedded_hal::i2c::I2c for LevelImuBus {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [embedded_hal::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        use embedded_hal::i2c::Operation;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.pointer = bytes[0] as usize;
                    if let Some(&value) = bytes.get(1) {
                        self.registers[self.pointer] = value;
                    }
                }
                Operation::Read(buf) => {
                    for (offset, slot) in buf.iter_mut().enumerate() {
                        *slot = self.registers[self.pointer + offset];
                    }
                }
            }
        }
        Ok(())
    }
}

/// SIM7000 answering over an `embedded-io` byte stream
struct ScriptedModemPort {
    line: Vec<u8>,
    rx: std::collections::VecDeque<u8>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedModemPort {
    fn answer(&mut self) {
        let line = String::from_utf8_lossy(&self.line).into_owned();
        self.line.clear();
        let reply = if let Some(body) = line.strip_suffix('\u{1a}') {
            self.sent.lock().unwrap().push(body.to_string());
            "\r\n+CMGS: 3\r\n\r\nOK\r\n"
        } else {
            match line.trim_end() {
                "AT+CPIN?" => "\r\n+CPIN: READY\r\n\r\nOK\r\n",
                "AT+CREG?" => "\r\n+CREG: 0,1\r\n\r\nOK\r\n",
                "AT+CSQ" => "\r\n+CSQ: 20,0\r\n\r\nOK\r\n",
                cmd if cmd.starts_with("AT+CMGS=") => "\r\n> ",
                _ => "\r\nOK\r\n",
            }
        };
        self.rx.extend(reply.bytes());
    }
}

impl embedded_io::ErrorType for ScriptedModemPort {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for ScriptedModemPort {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &byte in buf {
            self.line.push(byte);
            if self.line.ends_with(b"\r\n") || byte == 0x1A {
                self.answer();
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl embedded_io::Read for ScriptedModemPort {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

impl embedded_io::ReadReady for ScriptedModemPort {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx.is_empty())
    }
}

#[test]
fn hal_adapters_carry_detection_to_sms() {
    let config = DetectorConfig::default();
    let machine = machine(&config);

    let imu = Mpu6050::new(
        HalI2c::new(LevelImuBus::new()),
        MockTimer::new(),
        Mpu6050Config::default(),
    )
    .unwrap();

    let sent = Arc::new(Mutex::new(Vec::new()));
    let port = ScriptedModemPort {
        line: Vec::new(),
        rx: Default::default(),
        sent: sent.clone(),
    };
    let modem = Sim7000::new(AtChannel::new(IoUart::new(port), MockTimer::new()), true);
    let service = AlertService::new(modem, PHONE, config.gps_staleness_us);
    let dispatcher = InlineDispatcher::new(DeliveryWorker::new(service, machine.clone()));
    assert!(dispatcher.worker().service().modem().is_initialized());

    let mut pipeline = DetectionPipeline::new(
        config,
        imu,
        FixedClassifier::new(config.window_size, 0.95),
        machine,
        dispatcher,
    )
    .unwrap();

    for i in 0..50 {
        let report = pipeline.tick(i * PERIOD_US);
        assert!(report.sample_ok);
    }
    assert_eq!(pipeline.window().latest().unwrap().accel.z, 1.0);
    assert!(pipeline.state().is_pending());

    pipeline.tick(16_000_000);
    assert!(matches!(
        pipeline.state(),
        AlertState::Sent {
            delivery: Delivery::Delivered,
            ..
        }
    ));
    assert_eq!(
        *sent.lock().unwrap(),
        vec!["EMERGENCY: Car accident detected! Location unknown.".to_string()]
    );
}
