//! Clip-and-scale normalization into [-1, 1].

use crate::motion::{AccelRange, GyroRange, Sample, FEATURE_COUNT};

/// Clip `value` to `±range`.
#[inline]
pub fn clip_to_range(value: f32, range: f32) -> f32 {
    value.clamp(-range, range)
}

/// Clip `value` to `±range` and divide by `range`.
///
/// NaN inputs map to 0.0 so a glitched reading cannot poison the block.
#[inline]
pub fn normalize_value(value: f32, range: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    clip_to_range(value, range) / range
}

/// Per-sensor normalization using the configured full-scale ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    accel_range: f32,
    gyro_range: f32,
}

impl Normalizer {
    pub fn new(accel: AccelRange, gyro: GyroRange) -> Self {
        Self {
            accel_range: accel.full_scale(),
            gyro_range: gyro.full_scale(),
        }
    }

    pub fn accel_range(&self) -> f32 {
        self.accel_range
    }

    pub fn gyro_range(&self) -> f32 {
        self.gyro_range
    }

    /// Normalize one sample into model feature order.
    pub fn normalize(&self, sample: &Sample) -> [f32; FEATURE_COUNT] {
        let raw = sample.features();
        let mut out = [0.0; FEATURE_COUNT];
        for (i, value) in raw.iter().enumerate() {
            let range = if i < 3 {
                self.accel_range
            } else {
                self.gyro_range
            };
            out[i] = normalize_value(*value, range);
        }
        out
    }

    /// Clip a sample to the physical ranges without rescaling.
    pub fn clip(&self, sample: &Sample) -> Sample {
        let accel = sample.accel.map(|v| clip_to_range(v, self.accel_range));
        let gyro = sample.gyro.map(|v| clip_to_range(v, self.gyro_range));
        Sample {
            accel,
            gyro,
            timestamp_us: sample.timestamp_us,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(AccelRange::G2, GyroRange::Dps250)
    }

    #[test]
    fn values_inside_range_are_scaled() {
        let out = normalizer().normalize(&Sample::new([1.0, -0.5, 0.0], [125.0, 0.0, -250.0], 0));
        assert_eq!(out, [0.5, -0.25, 0.0, 0.5, 0.0, -1.0]);
    }

    #[test]
    fn values_outside_range_saturate() {
        let out = normalizer().normalize(&Sample::new([5.0, -9.0, 2.0], [900.0, -251.0, 0.0], 0));
        assert_eq!(out, [1.0, -1.0, 1.0, 1.0, -1.0, 0.0]);
    }

    #[test]
    fn nan_maps_to_zero() {
        assert_eq!(normalize_value(f32::NAN, 2.0), 0.0);
    }

    #[test]
    fn clipping_first_gives_same_result() {
        let n = normalizer();
        let inputs = [
            Sample::new([3.7, -0.2, 1.0], [12.0, 400.0, -999.0], 0),
            Sample::new([-2.0, 2.0, 0.1], [-250.0, 250.0, 0.0], 0),
            Sample::new([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 0),
        ];
        for sample in inputs {
            let once = n.normalize(&sample);
            let clipped = n.clip(&sample);
            assert_eq!(n.normalize(&clipped), once);
            assert_eq!(n.clip(&clipped), clipped);
        }
    }

    #[test]
    fn output_always_within_unit_interval() {
        let n = Normalizer::new(AccelRange::G16, GyroRange::Dps2000);
        let mut value = -40.0f32;
        while value <= 40.0 {
            let sample = Sample::new([value; 3], [value * 100.0; 3], 0);
            for feature in n.normalize(&sample) {
                assert!((-1.0..=1.0).contains(&feature));
            }
            value += 0.75;
        }
    }
}
