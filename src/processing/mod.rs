//! Signal processing — filtering, integration, boundaries, statistics,
//! spectra, and display decimation

mod boundaries;
mod decimate;
mod fft;
mod filter;
mod integrate;
mod stats;

pub use boundaries::{
    detect, MIN_DWELL_SECS, MIN_PLATEAU_SECS, PLATEAU_MIN_SPEED_FRACTION, PLATEAU_SLOPE_TOL,
    START_FRACTION,
};
pub use decimate::{decimate, DISPLAY_TARGET_POINTS};
pub use fft::{compute_fft, dominant_frequency, FftResult, SpectrumPoint};
pub use filter::{apply_filters, kalman_smooth, FilterReport, StageOutcome};
pub use integrate::{integrate, DriftCorrection, Kinematics};
pub use stats::{axis_stats, compute_iso_stats, A95_SUBWINDOW_SECS};

use thiserror::Error;

/// Errors in pipeline-level signal processing.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("invalid sample rate: {0} (must be > 0)")]
    InvalidSampleRate(f64),
}
