//! Simulated motion source
//!
//! Produces a level, slightly vibrating vehicle with optional scripted
//! impacts. Used by the host binary and by scenario tests.

use std::f32::consts::PI;

use crash_beacon_core::motion::{Sample, GRAVITY_G};

use crate::devices::traits::{MotionError, MotionSource};

/// One scripted collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactProfile {
    /// Time of first impact sample (µs)
    pub start_us: u64,
    /// Duration of the pulse (µs)
    pub duration_us: u64,
    /// Peak deceleration along -X (g)
    pub peak_g: f32,
    /// Peak yaw rate during the pulse (°/s)
    pub peak_dps: f32,
}

impl ImpactProfile {
    /// A frontal collision: 6 g over 200 ms with a 180 °/s spin
    pub fn frontal(start_us: u64) -> Self {
        Self {
            start_us,
            duration_us: 200_000,
            peak_g: 6.0,
            peak_dps: 180.0,
        }
    }

    /// Pulse envelope in [0, 1] at `t_us` (half sine)
    fn envelope(&self, t_us: u64) -> f32 {
        if t_us < self.start_us || self.duration_us == 0 {
            return 0.0;
        }
        let elapsed = t_us - self.start_us;
        if elapsed >= self.duration_us {
            return 0.0;
        }
        let phase = elapsed as f32 / self.duration_us as f32;
        (PI * phase).sin()
    }
}

/// Scripted motion source
#[derive(Debug, Clone, Default)]
pub struct SimulatedMotion {
    impacts: Vec<ImpactProfile>,
    vibration_g: f32,
    failures_remaining: u32,
    fail_permanently: bool,
}

impl SimulatedMotion {
    /// A car at rest with engine vibration of 0.02 g
    pub fn new() -> Self {
        Self {
            vibration_g: 0.02,
            ..Default::default()
        }
    }

    /// Add a scripted impact
    pub fn with_impact(mut self, impact: ImpactProfile) -> Self {
        self.impacts.push(impact);
        self
    }

    /// Set vibration amplitude (g)
    pub fn with_vibration(mut self, amplitude_g: f32) -> Self {
        self.vibration_g = amplitude_g.abs();
        self
    }

    /// Fail the next `count` reads
    pub fn fail_next(&mut self, count: u32) {
        self.failures_remaining = count;
    }

    /// Fail every read from now on (or stop doing so)
    pub fn set_failed(&mut self, failed: bool) {
        self.fail_permanently = failed;
    }

    /// Noise-free sample at `t_us`
    pub fn sample_at(&self, t_us: u64) -> Sample {
        let t = t_us as f32 / 1_000_000.0;
        let wobble = self.vibration_g * (2.0 * PI * 13.0 * t).sin();

        let (decel, spin) = self.impacts.iter().fold((0.0f32, 0.0f32), |(a, g), imp| {
            let e = imp.envelope(t_us);
            (a + imp.peak_g * e, g + imp.peak_dps * e)
        });

        Sample::new(
            [-decel + wobble, 0.3 * decel, GRAVITY_G + wobble],
            [0.5 * wobble, 0.0, spin],
            t_us,
        )
    }
}

impl MotionSource for SimulatedMotion {
    fn read_sample(&mut self, timestamp_us: u64) -> Result<Sample, MotionError> {
        if self.fail_permanently {
            return Err(MotionError::Unavailable);
        }
        if self.failures_remaining > 0 {
            self.failures_remaining -= 1;
            return Err(MotionError::Unavailable);
        }
        Ok(self.sample_at(timestamp_us))
    }

    fn is_healthy(&self) -> bool {
        !self.fail_permanently
    }
}
