//! Ride-phase boundaries and segment statistics types

use serde::{Deserialize, Serialize};

/// A (time, value) pair locating an extremum in the recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedValue {
    /// Time (s)
    pub time: f64,
    /// Signed sample value (Gal)
    pub value: f64,
}

/// The four ride-phase timestamps detected from the velocity profile.
///
/// When `is_valid` is true: `0 ≤ t0 ≤ t1 ≤ t2 ≤ t3 ≤ max_time`.
/// When false, no reliable constant-velocity plateau was found and the
/// t-values carry no meaning — callers must not use them for
/// segment-bounded statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevatorBoundaries {
    /// Motion start (s)
    pub t0: f64,
    /// Constant-velocity entry (s)
    pub t1: f64,
    /// Constant-velocity exit (s)
    pub t2: f64,
    /// Motion stop (s)
    pub t3: f64,
    pub is_valid: bool,
}

impl ElevatorBoundaries {
    /// The "no plateau found" result. All timestamps are zero and meaningless.
    pub fn invalid() -> Self {
        Self {
            t0: 0.0,
            t1: 0.0,
            t2: 0.0,
            t3: 0.0,
            is_valid: false,
        }
    }
}

/// Statistics over one axis of one time segment, per ISO 18738 / GB/T 24474.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisStats {
    /// Root-mean-square value (the time-averaged weighted value a_w)
    pub rms: f64,
    /// Maximum absolute value in the segment
    pub peak_val: f64,
    /// max(x) − min(x) over the segment
    pub pk_pk: f64,
    /// Single largest excursion from zero (equals `peak_val`, reported
    /// separately to distinguish it from the peak-to-peak swing)
    pub zero_pk: f64,
    /// 95th-percentile peak-to-peak over 1-second sub-windows
    pub a95: f64,
    /// The (max, min) samples defining `pk_pk`, in that order
    pub max_pk_pk_pair: Option<(TimedValue, TimedValue)>,
    /// The sample of maximum absolute magnitude, sign preserved
    pub max_zero_pk_point: Option<TimedValue>,
}

/// Per-axis statistics for one axis: the constant-velocity segment, and
/// (z axis only) the whole-ride segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSummary {
    /// Stats over [t1, t2]; `None` when boundaries are invalid or the
    /// segment is empty.
    pub const_vel: Option<AxisStats>,
    /// Stats over [t0, t3] (z axis only; full recording when boundaries
    /// are invalid).
    pub global: Option<AxisStats>,
}

/// The full ISO statistics record: x, y, z constant-velocity stats plus the
/// z-axis whole-ride stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoStats {
    pub x: AxisSummary,
    pub y: AxisSummary,
    pub z: AxisSummary,
}
