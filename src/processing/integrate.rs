//! Kinematic integration of vertical acceleration
//!
//! Velocity and displacement come from trapezoidal integration of the
//! filtered vertical acceleration. Integration accumulates any DC bias
//! into unbounded drift, so the pipeline detrends the acceleration first:
//! a ride starts and ends at rest, which makes the true mean vertical
//! acceleration over the record zero — whatever mean the sensor reports
//! is bias. `DriftCorrection::None` keeps the raw behaviour testable
//! against a·T / a·T²/2 references.

use serde::{Deserialize, Serialize};

/// How to control DC drift before integrating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DriftCorrection {
    /// Integrate the signal as-is. Only for synthetic references.
    None,
    /// Subtract the whole-record mean from acceleration before
    /// integrating. The pipeline default.
    #[default]
    MeanDetrend,
}

/// Integrated vertical kinematics, same length as the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    /// Vertical velocity (cm/s); first sample is 0
    pub vz: Vec<f64>,
    /// Vertical displacement (cm); first sample is 0
    pub sz: Vec<f64>,
}

/// Integrate vertical acceleration (Gal) into velocity (cm/s) and
/// displacement (cm) by the trapezoidal rule.
pub fn integrate(accel_z: &[f64], sample_rate: f64, drift: DriftCorrection) -> Kinematics {
    let n = accel_z.len();
    if n == 0 || sample_rate <= 0.0 {
        return Kinematics {
            vz: Vec::new(),
            sz: Vec::new(),
        };
    }

    let bias = match drift {
        DriftCorrection::None => 0.0,
        DriftCorrection::MeanDetrend => accel_z.iter().sum::<f64>() / n as f64,
    };

    let dt = 1.0 / sample_rate;
    let mut vz = Vec::with_capacity(n);
    let mut sz = Vec::with_capacity(n);
    vz.push(0.0);
    sz.push(0.0);

    for i in 1..n {
        let a_prev = accel_z[i - 1] - bias;
        let a_curr = accel_z[i] - bias;
        let v = vz[i - 1] + 0.5 * (a_prev + a_curr) * dt;
        let s = sz[i - 1] + 0.5 * (vz[i - 1] + v) * dt;
        vz.push(v);
        sz.push(s);
    }

    Kinematics { vz, sz }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_acceleration_round_trip() {
        // a = 10 Gal for T = 2 s at 1 kHz: v(T) = a·T, s(T) = a·T²/2
        let fs = 1000.0;
        let a = 10.0;
        let t = 2.0;
        let n = (fs * t) as usize + 1;
        let accel = vec![a; n];

        let k = integrate(&accel, fs, DriftCorrection::None);
        let v_end = *k.vz.last().expect("non-empty");
        let s_end = *k.sz.last().expect("non-empty");

        assert!((v_end - a * t).abs() < 1e-6, "v(T) = {v_end}, want {}", a * t);
        assert!(
            (s_end - a * t * t / 2.0).abs() / (a * t * t / 2.0) < 1e-3,
            "s(T) = {s_end}, want {}",
            a * t * t / 2.0
        );
    }

    #[test]
    fn test_first_samples_are_zero() {
        let k = integrate(&[5.0, 5.0, 5.0], 100.0, DriftCorrection::None);
        assert_eq!(k.vz[0], 0.0);
        assert_eq!(k.sz[0], 0.0);
        assert_eq!(k.vz.len(), 3);
    }

    #[test]
    fn test_mean_detrend_cancels_bias() {
        // Rest → up → rest trapezoid with a constant sensor bias added.
        // Detrended integration must end near zero velocity despite it.
        let fs = 100.0;
        let bias = 3.0;
        let mut accel = Vec::new();
        accel.extend(std::iter::repeat(0.0).take(100)); // rest
        accel.extend(std::iter::repeat(50.0).take(100)); // accelerate
        accel.extend(std::iter::repeat(0.0).take(300)); // cruise
        accel.extend(std::iter::repeat(-50.0).take(100)); // decelerate
        accel.extend(std::iter::repeat(0.0).take(100)); // rest
        for a in &mut accel {
            *a += bias;
        }

        let raw = integrate(&accel, fs, DriftCorrection::None);
        let detrended = integrate(&accel, fs, DriftCorrection::MeanDetrend);

        let raw_end = raw.vz.last().copied().unwrap_or(0.0);
        let fixed_end = detrended.vz.last().copied().unwrap_or(0.0);
        assert!(raw_end.abs() > 10.0, "bias must visibly drift raw velocity");
        assert!(
            fixed_end.abs() < 1e-6,
            "detrended final velocity should be ~0, got {fixed_end}"
        );
    }

    #[test]
    fn test_empty_input() {
        let k = integrate(&[], 100.0, DriftCorrection::MeanDetrend);
        assert!(k.vz.is_empty());
        assert!(k.sz.is_empty());
    }
}
