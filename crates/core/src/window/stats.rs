//! Per-axis summary statistics over a window.

use libm::sqrtf;
use nalgebra::Vector3;

use crate::motion::Sample;

/// Mean, standard deviation and absolute maximum per axis, plus the peak
/// acceleration magnitude. Logged alongside detections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub count: usize,
    pub accel_mean: Vector3<f32>,
    pub accel_std: Vector3<f32>,
    pub accel_abs_max: Vector3<f32>,
    pub gyro_mean: Vector3<f32>,
    pub gyro_std: Vector3<f32>,
    pub gyro_abs_max: Vector3<f32>,
    /// Largest |accel| over the window (g)
    pub peak_accel_g: f32,
}

impl WindowStats {
    /// Compute statistics; `None` for an empty window.
    pub fn compute<'a, I>(samples: I) -> Option<Self>
    where
        I: Iterator<Item = &'a Sample> + Clone,
    {
        let mut count = 0usize;
        let mut accel_sum = Vector3::zeros();
        let mut gyro_sum = Vector3::zeros();
        let mut accel_abs_max = Vector3::zeros();
        let mut gyro_abs_max = Vector3::zeros();
        let mut peak_accel_g = 0.0f32;

        for s in samples.clone() {
            count += 1;
            accel_sum += s.accel;
            gyro_sum += s.gyro;
            accel_abs_max = accel_abs_max.zip_map(&s.accel, |m: f32, v: f32| m.max(abs(v)));
            gyro_abs_max = gyro_abs_max.zip_map(&s.gyro, |m: f32, v: f32| m.max(abs(v)));
            peak_accel_g = peak_accel_g.max(s.accel_magnitude());
        }

        if count == 0 {
            return None;
        }

        let n = count as f32;
        let accel_mean = accel_sum / n;
        let gyro_mean = gyro_sum / n;

        let mut accel_var = Vector3::zeros();
        let mut gyro_var = Vector3::zeros();
        for s in samples {
            let da = s.accel - accel_mean;
            let dg = s.gyro - gyro_mean;
            accel_var += da.component_mul(&da);
            gyro_var += dg.component_mul(&dg);
        }

        Some(Self {
            count,
            accel_mean,
            accel_std: (accel_var / n).map(sqrtf),
            accel_abs_max,
            gyro_mean,
            gyro_std: (gyro_var / n).map(sqrtf),
            gyro_abs_max,
            peak_accel_g,
        })
    }
}

#[inline]
fn abs(v: f32) -> f32 {
    libm::fabsf(v)
}
