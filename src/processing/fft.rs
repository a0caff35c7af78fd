//! Spectral analysis
//!
//! Single-sided amplitude spectrum of one channel over a selected time
//! window. Segments that are not a power of two are zero-padded up to the
//! next power of two, and the frequency bins are derived from the padded
//! length so the `k·fs/N` mapping stays exact.

use num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

/// One bin of a single-sided amplitude spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    /// Bin center frequency (Hz)
    pub frequency: f64,
    /// Single-sided amplitude (input units)
    pub magnitude: f64,
}

/// Magnitude spectrum of one analysis window: bins `k = 0..N/2` in
/// ascending frequency, resolution `sample_rate / N` with `N` the padded
/// length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FftResult {
    pub points: Vec<SpectrumPoint>,
    /// Bin spacing (Hz); 0 for an empty result
    pub resolution_hz: f64,
}

impl FftResult {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Compute the single-sided amplitude spectrum of `samples`.
///
/// Scaling is `2·|X(k)|/N` for interior bins, with the DC and Nyquist
/// bins at `|X(k)|/N` (they have no mirrored counterpart to fold in).
/// An empty input yields an empty result, never an error.
pub fn compute_fft(samples: &[f64], sample_rate: f64) -> FftResult {
    if samples.is_empty() || sample_rate <= 0.0 {
        return FftResult::default();
    }

    let n = samples.len().next_power_of_two();
    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .map(|&x| Complex::new(x, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(n)
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let n_bins = n / 2 + 1;
    let resolution = sample_rate / n as f64;

    let points = buffer
        .iter()
        .take(n_bins)
        .enumerate()
        .map(|(k, c)| {
            let scale = if k == 0 || k == n_bins - 1 {
                1.0 / n as f64
            } else {
                2.0 / n as f64
            };
            SpectrumPoint {
                frequency: k as f64 * resolution,
                magnitude: c.norm() * scale,
            }
        })
        .collect();

    tracing::debug!(
        input_len = samples.len(),
        fft_size = n,
        resolution_hz = resolution,
        "spectrum computed"
    );

    FftResult {
        points,
        resolution_hz: resolution,
    }
}

/// The bin of maximum magnitude, excluding DC.
///
/// `None` for results with no non-DC bins.
pub fn dominant_frequency(result: &FftResult) -> Option<SpectrumPoint> {
    result
        .points
        .iter()
        .skip(1)
        .max_by(|a, b| {
            a.magnitude
                .partial_cmp(&b.magnitude)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .copied()
}
