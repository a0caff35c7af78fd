//! Ride-phase boundary detection
//!
//! A state machine over the vertical velocity profile locates the four
//! milestones of one elevator run: motion start (t0), constant-velocity
//! entry (t1) and exit (t2), motion stop (t3). Motion thresholds are
//! fractions of the observed peak speed, so the detector is insensitive
//! to rated speed, travel direction, and unit scale; the plateau is
//! identified by velocity *flatness* (windowed rate of change), because a
//! pure speed band would sweep the ramp tails — where the car is still
//! visibly accelerating — into the constant-velocity statistics. Rides
//! with no usable plateau (short jog moves, releveling) are reported as
//! invalid rather than guessed at.

use crate::types::{ElevatorBoundaries, ProcessedDataPoint};

/// Motion threshold as a fraction of peak |v|: above = moving.
pub const START_FRACTION: f64 = 0.05;

/// Minimum speed, as a fraction of peak |v|, for a sample to belong to
/// the plateau at all. Separates the cruise from the equally flat rest
/// phases at either end of the recording.
pub const PLATEAU_MIN_SPEED_FRACTION: f64 = 0.5;

/// Flatness tolerance: a sample is "constant velocity" when the local
/// windowed |dv/dt| is below this fraction of peak speed per second.
pub const PLATEAU_SLOPE_TOL: f64 = 0.02;

/// Minimum dwell (s) a threshold crossing must hold to count. Rejects
/// single-sample noise spikes. Also the width of the slope window.
pub const MIN_DWELL_SECS: f64 = 0.2;

/// Minimum plateau duration (s) for boundaries to be valid.
pub const MIN_PLATEAU_SECS: f64 = 1.0;

/// First index at which `predicate` holds for a full dwell window.
fn first_sustained<F>(from: usize, n: usize, dwell: usize, predicate: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    let mut run_start = None;
    let mut run_len = 0usize;

    for i in from..n {
        if predicate(i) {
            if run_start.is_none() {
                run_start = Some(i);
            }
            run_len += 1;
            if run_len >= dwell {
                return run_start;
            }
        } else {
            run_start = None;
            run_len = 0;
        }
    }
    // A run touching the end of the recording counts even if shorter than
    // a full dwell window; nothing after it can contradict it.
    run_start.filter(|_| run_len > 0)
}

/// Detect ride-phase boundaries from the velocity profile.
///
/// Returns [`ElevatorBoundaries::invalid`] when the recording is empty,
/// never leaves rest, or holds no plateau of at least
/// [`MIN_PLATEAU_SECS`].
pub fn detect(processed: &[ProcessedDataPoint], sample_rate: f64) -> ElevatorBoundaries {
    let n = processed.len();
    if n == 0 || sample_rate <= 0.0 {
        return ElevatorBoundaries::invalid();
    }

    let velocity: Vec<f64> = processed.iter().map(|p| p.vz).collect();
    let peak = velocity.iter().fold(0.0f64, |m, &v| m.max(v.abs()));
    if peak <= 0.0 {
        return ElevatorBoundaries::invalid();
    }

    let start_threshold = START_FRACTION * peak;
    let min_plateau_speed = PLATEAU_MIN_SPEED_FRACTION * peak;
    let slope_tol = PLATEAU_SLOPE_TOL * peak;
    let dwell = ((MIN_DWELL_SECS * sample_rate) as usize).max(1);
    let half = (dwell / 2).max(1);

    // Central-difference slope over a dwell-wide window. Averaging across
    // the window keeps vibration ripple from masquerading as ramp slope.
    let slope = |i: usize| -> f64 {
        let lo = i.saturating_sub(half);
        let hi = (i + half).min(n - 1);
        if hi == lo {
            return 0.0;
        }
        (velocity[hi] - velocity[lo]) * sample_rate / (hi - lo) as f64
    };

    let in_plateau =
        |i: usize| velocity[i].abs() >= min_plateau_speed && slope(i).abs() <= slope_tol;

    // t0: motion start
    let Some(i0) = first_sustained(0, n, dwell, |i| velocity[i].abs() > start_threshold) else {
        return ElevatorBoundaries::invalid();
    };

    // t1: plateau entry — velocity has flattened out at speed
    let Some(i1) = first_sustained(i0, n, dwell, &in_plateau) else {
        tracing::debug!("no constant-velocity plateau entry found");
        return ElevatorBoundaries::invalid();
    };

    // t2: plateau exit — last sample still flat and at speed
    let Some(i2) = (i1..n).rev().find(|&i| in_plateau(i)) else {
        return ElevatorBoundaries::invalid();
    };

    if (i2 - i1) as f64 / sample_rate < MIN_PLATEAU_SECS {
        tracing::debug!(
            plateau_secs = (i2 - i1) as f64 / sample_rate,
            "plateau too short, boundaries invalid"
        );
        return ElevatorBoundaries::invalid();
    }

    // t3: motion stop — back below the start threshold and staying there
    let i3 = first_sustained(i2, n, dwell, |i| velocity[i].abs() < start_threshold)
        .unwrap_or(n - 1);

    let bounds = ElevatorBoundaries {
        t0: processed[i0].time,
        t1: processed[i1].time,
        t2: processed[i2].time,
        t3: processed[i3].time,
        is_valid: true,
    };

    debug_assert!(bounds.t0 <= bounds.t1 && bounds.t1 <= bounds.t2 && bounds.t2 <= bounds.t3);

    tracing::debug!(
        t0 = bounds.t0,
        t1 = bounds.t1,
        t2 = bounds.t2,
        t3 = bounds.t3,
        "ride boundaries detected"
    );

    bounds
}
