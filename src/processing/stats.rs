//! Segment statistics per ISO 18738 / GB/T 24474
//!
//! All statistics operate on a closed time interval of the processed
//! series and are fully deterministic: identical inputs always produce
//! identical outputs.

use statrs::statistics::{Data, OrderStatistics};

use crate::types::{
    AxisStats, AxisSummary, Channel, ElevatorBoundaries, IsoStats, ProcessedDataPoint, TimedValue,
};

/// A95 sub-window length (s). The ride segment is split into windows of
/// this length; A95 is the 95th percentile of their peak-to-peak values.
pub const A95_SUBWINDOW_SECS: f64 = 1.0;

/// Indices of the samples inside the closed interval [t_start, t_end].
fn segment_range(data: &[ProcessedDataPoint], t_start: f64, t_end: f64) -> Option<(usize, usize)> {
    let first = data.iter().position(|p| p.time >= t_start)?;
    let last = data.iter().rposition(|p| p.time <= t_end)?;
    (first <= last).then_some((first, last))
}

/// Compute [`AxisStats`] for one channel over the closed interval
/// [t_start, t_end]. Returns `None` when the segment holds no samples.
pub fn axis_stats(
    data: &[ProcessedDataPoint],
    channel: Channel,
    t_start: f64,
    t_end: f64,
) -> Option<AxisStats> {
    let (first, last) = segment_range(data, t_start, t_end)?;
    let segment = &data[first..=last];

    let mut sum_sq = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    let mut max_point = segment[0];
    let mut min_point = segment[0];
    let mut abs_peak_point = segment[0];

    for point in segment {
        let v = channel.value(point);
        sum_sq += v * v;
        if v > max {
            max = v;
            max_point = *point;
        }
        if v < min {
            min = v;
            min_point = *point;
        }
        if v.abs() > channel.value(&abs_peak_point).abs() {
            abs_peak_point = *point;
        }
    }

    let rms = (sum_sq / segment.len() as f64).sqrt();
    let peak_val = channel.value(&abs_peak_point).abs();
    let pk_pk = max - min;

    let timed = |p: &ProcessedDataPoint| TimedValue {
        time: p.time,
        value: channel.value(p),
    };

    Some(AxisStats {
        rms,
        peak_val,
        pk_pk,
        zero_pk: peak_val,
        a95: a95(segment, channel),
        max_pk_pk_pair: Some((timed(&max_point), timed(&min_point))),
        max_zero_pk_point: Some(timed(&abs_peak_point)),
    })
}

/// 95th-percentile of per-sub-window peak-to-peak values.
///
/// Only complete sub-windows participate; a trailing partial window (or a
/// segment shorter than one window) contributes nothing, so transient
/// segments report 0.0 rather than a value ranked from noise.
fn a95(segment: &[ProcessedDataPoint], channel: Channel) -> f64 {
    let Some(rate) = estimate_sample_rate(segment) else {
        return 0.0;
    };
    let window = (A95_SUBWINDOW_SECS * rate) as usize;
    if window == 0 || segment.len() < window {
        return 0.0;
    }

    let pk_pks: Vec<f64> = segment
        .chunks_exact(window)
        .map(|chunk| {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for p in chunk {
                let v = channel.value(p);
                lo = lo.min(v);
                hi = hi.max(v);
            }
            hi - lo
        })
        .collect();

    if pk_pks.is_empty() {
        return 0.0;
    }

    let mut data = Data::new(pk_pks);
    data.percentile(95)
}

/// Sample rate inferred from the segment's time axis.
fn estimate_sample_rate(segment: &[ProcessedDataPoint]) -> Option<f64> {
    if segment.len() < 2 {
        return None;
    }
    let dt = segment[1].time - segment[0].time;
    (dt > 0.0).then(|| 1.0 / dt)
}

/// Assemble the full ISO statistics record from detected boundaries.
///
/// Constant-velocity statistics cover [t1, t2] and are omitted (`None`)
/// when boundaries are invalid — never fabricated. The z-axis whole-ride
/// statistics cover [t0, t3], falling back to the entire recording when
/// boundaries are invalid; that fallback keeps the global peak-to-peak
/// reportable for rides with no usable plateau.
pub fn compute_iso_stats(
    data: &[ProcessedDataPoint],
    boundaries: &ElevatorBoundaries,
) -> IsoStats {
    if data.is_empty() {
        return IsoStats::default();
    }

    let const_vel = |channel: Channel| {
        boundaries
            .is_valid
            .then(|| axis_stats(data, channel, boundaries.t1, boundaries.t2))
            .flatten()
    };

    let (global_start, global_end) = if boundaries.is_valid {
        (boundaries.t0, boundaries.t3)
    } else {
        // last() guarded by the emptiness check above
        (0.0, data.last().map(|p| p.time).unwrap_or(0.0))
    };

    let ((x, y), (z_const, z_global)) = rayon::join(
        || {
            rayon::join(
                || const_vel(Channel::Ax),
                || const_vel(Channel::Ay),
            )
        },
        || {
            rayon::join(
                || const_vel(Channel::Az),
                || axis_stats(data, Channel::Az, global_start, global_end),
            )
        },
    );

    IsoStats {
        x: AxisSummary {
            const_vel: x,
            global: None,
        },
        y: AxisSummary {
            const_vel: y,
            global: None,
        },
        z: AxisSummary {
            const_vel: z_const,
            global: z_global,
        },
    }
}
