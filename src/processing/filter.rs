//! Butterworth band shaping and Kalman smoothing
//!
//! Band shaping uses 2nd-order Butterworth biquads (Q = 1/√2) from the
//! standard RBJ audio-cookbook bilinear-transform coefficients. Each
//! enabled band is applied zero-phase: forward pass, reverse, forward
//! pass again, reverse. That cancels the filter's group delay at the cost
//! of doubling the effective order in magnitude — phase shift would
//! corrupt the timing of detected peaks and ride-phase boundaries.
//!
//! Invalid cutoffs never error: the stage is skipped and the skip is
//! reported through [`FilterReport`] so callers can surface the
//! degradation.

use serde::{Deserialize, Serialize};

use crate::config::{FilterConfig, TargetAxes};
use crate::types::Sample;

/// Butterworth quality factor for a maximally flat 2nd-order section.
const BUTTERWORTH_Q: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Outcome of one filter stage for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageOutcome {
    /// Stage ran over the target axes.
    Applied,
    /// Stage was not enabled in the config.
    NotRequested,
    /// Stage was requested but the cutoff was out of range
    /// (`<= 0`, or `>= Nyquist` for the low-pass).
    SkippedInvalidCutoff,
}

/// Per-stage record of what the Filter Engine actually did.
///
/// Invalid parameters degrade to "stage skipped" rather than erroring;
/// this report is how that degradation stays observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterReport {
    /// Whether the filter stage was enabled at all.
    pub enabled: bool,
    pub high_pass: StageOutcome,
    pub low_pass: StageOutcome,
    pub kalman: StageOutcome,
}

impl FilterReport {
    /// Report for a disabled filter stage (raw pass-through).
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            high_pass: StageOutcome::NotRequested,
            low_pass: StageOutcome::NotRequested,
            kalman: StageOutcome::NotRequested,
        }
    }

    /// True when any requested stage was skipped for invalid parameters.
    pub fn degraded(&self) -> bool {
        [self.high_pass, self.low_pass, self.kalman]
            .iter()
            .any(|s| *s == StageOutcome::SkippedInvalidCutoff)
    }
}

// ============================================================================
// Biquad
// ============================================================================

/// A 2nd-order digital filter section (normalized a0 = 1).
#[derive(Debug, Clone, Copy)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Biquad {
    /// Low-pass Butterworth section at `cutoff` Hz for sample rate `fs`.
    fn low_pass(cutoff: f64, fs: f64) -> Self {
        let omega = 2.0 * std::f64::consts::PI * cutoff / fs;
        let sn = omega.sin();
        let cs = omega.cos();
        let alpha = sn / (2.0 * BUTTERWORTH_Q);
        let a0 = 1.0 + alpha;

        Self {
            b0: (1.0 - cs) / 2.0 / a0,
            b1: (1.0 - cs) / a0,
            b2: (1.0 - cs) / 2.0 / a0,
            a1: (-2.0 * cs) / a0,
            a2: (1.0 - alpha) / a0,
        }
    }

    /// High-pass Butterworth section at `cutoff` Hz for sample rate `fs`.
    fn high_pass(cutoff: f64, fs: f64) -> Self {
        let omega = 2.0 * std::f64::consts::PI * cutoff / fs;
        let sn = omega.sin();
        let cs = omega.cos();
        let alpha = sn / (2.0 * BUTTERWORTH_Q);
        let a0 = 1.0 + alpha;

        Self {
            b0: (1.0 + cs) / 2.0 / a0,
            b1: -(1.0 + cs) / a0,
            b2: (1.0 + cs) / 2.0 / a0,
            a1: (-2.0 * cs) / a0,
            a2: (1.0 - alpha) / a0,
        }
    }

    /// One causal direct-form-I pass with zero initial state.
    fn run(&self, input: &[f64]) -> Vec<f64> {
        let mut output = Vec::with_capacity(input.len());
        let (mut x1, mut x2, mut y1, mut y2) = (0.0, 0.0, 0.0, 0.0);

        for &x0 in input {
            let y0 = self.b0 * x0 + self.b1 * x1 + self.b2 * x2 - self.a1 * y1 - self.a2 * y2;
            output.push(y0);
            x2 = x1;
            x1 = x0;
            y2 = y1;
            y1 = y0;
        }
        output
    }

    /// Zero-phase application: forward, reverse, forward again, reverse.
    fn filtfilt(&self, input: &[f64]) -> Vec<f64> {
        let mut forward = self.run(input);
        forward.reverse();
        let mut backward = self.run(&forward);
        backward.reverse();
        backward
    }
}

// ============================================================================
// Kalman smoother
// ============================================================================

/// 1-D recursive Kalman smoother with a constant-value process model.
///
/// State is initialized to the first sample, covariance to 1. Each step:
/// predict `p += q`, gain `k = p/(p+r)`, update `x += k·(z−x)`,
/// `p *= (1−k)`. Larger `q` reacts faster (less smoothing); larger `r`
/// smooths harder (more lag).
pub fn kalman_smooth(input: &[f64], q: f64, r: f64) -> Vec<f64> {
    let Some(&first) = input.first() else {
        return Vec::new();
    };

    let mut x = first;
    let mut p = 1.0;
    let mut output = Vec::with_capacity(input.len());

    for &z in input {
        p += q;
        let k = p / (p + r);
        x += k * (z - x);
        p *= 1.0 - k;
        output.push(x);
    }
    output
}

// ============================================================================
// Filter Engine entry point
// ============================================================================

/// Apply the configured band-shaping and Kalman stages.
///
/// Returns samples with the same length and time axis as the input, plus a
/// [`FilterReport`] of what actually ran. Pure transformation: never
/// errors, never mutates its input.
pub fn apply_filters(
    samples: &[Sample],
    sample_rate: f64,
    config: &FilterConfig,
) -> (Vec<Sample>, FilterReport) {
    if !config.enabled || samples.is_empty() {
        return (samples.to_vec(), FilterReport::disabled());
    }

    let filter_xy = config.target_axes == TargetAxes::All;
    let nyquist = sample_rate / 2.0;

    let mut report = FilterReport {
        enabled: true,
        high_pass: StageOutcome::NotRequested,
        low_pass: StageOutcome::NotRequested,
        kalman: StageOutcome::NotRequested,
    };

    // Band stages that survived the cutoff checks, applied in order.
    let mut stages: Vec<Biquad> = Vec::with_capacity(2);

    if config.high_pass_freq > 0.0 {
        stages.push(Biquad::high_pass(config.high_pass_freq, sample_rate));
        report.high_pass = StageOutcome::Applied;
    } else if config.high_pass_freq != 0.0 {
        report.high_pass = StageOutcome::SkippedInvalidCutoff;
    }

    if config.low_pass_freq > 0.0 && config.low_pass_freq < nyquist {
        stages.push(Biquad::low_pass(config.low_pass_freq, sample_rate));
        report.low_pass = StageOutcome::Applied;
    } else if config.low_pass_freq != 0.0 {
        // Requested but negative or at/above Nyquist; 0 means "off"
        report.low_pass = StageOutcome::SkippedInvalidCutoff;
        tracing::warn!(
            cutoff = config.low_pass_freq,
            nyquist,
            "low-pass cutoff out of (0, Nyquist), stage skipped"
        );
    }

    if config.enable_kalman {
        if config.kalman_q > 0.0 && config.kalman_r > 0.0 {
            report.kalman = StageOutcome::Applied;
        } else {
            report.kalman = StageOutcome::SkippedInvalidCutoff;
        }
    }

    // Per-channel chain: every surviving band stage zero-phase, then Kalman.
    let process = |series: Vec<f64>| -> Vec<f64> {
        let mut series = series;
        for stage in &stages {
            series = stage.filtfilt(&series);
        }
        if report.kalman == StageOutcome::Applied {
            series = kalman_smooth(&series, config.kalman_q, config.kalman_r);
        }
        series
    };

    let ax: Vec<f64> = samples.iter().map(|s| s.ax).collect();
    let ay: Vec<f64> = samples.iter().map(|s| s.ay).collect();
    let az: Vec<f64> = samples.iter().map(|s| s.az).collect();

    // Axes are independent through this stage; z always filters, x/y only
    // when targeted.
    let (az, (ax, ay)) = rayon::join(
        || process(az),
        || {
            rayon::join(
                || if filter_xy { process(ax) } else { ax },
                || if filter_xy { process(ay) } else { ay },
            )
        },
    );

    let filtered = samples
        .iter()
        .enumerate()
        .map(|(i, s)| Sample {
            time: s.time,
            ax: ax[i],
            ay: ay[i],
            az: az[i],
        })
        .collect();

    tracing::debug!(?report, stages = stages.len(), "filter stage complete");

    (filtered, report)
}
