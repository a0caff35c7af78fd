//! Analysis pipeline
//!
//! One pure batch function turns a raw recording plus configuration into
//! the complete derived-state record:
//!
//! ```text
//! raw samples → filter → integrate (z) → boundaries → ISO statistics
//! ```
//!
//! `recompute` replaces the whole [`DerivedState`] atomically — callers
//! re-run it on any change to the raw data, filter config, or sample
//! rate, and drop stale results wholesale (last request wins). No stage
//! mutates its input; axes run in parallel inside the filter and
//! statistics stages.

use serde::{Deserialize, Serialize};

use crate::config::FilterConfig;
use crate::processing::{
    apply_filters, compute_iso_stats, detect, integrate, DriftCorrection, FilterReport,
    ProcessingError,
};
use crate::types::{ElevatorBoundaries, IsoStats, ProcessedDataPoint, Sample};

/// Everything derived from one recording under one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedState {
    pub processed: Vec<ProcessedDataPoint>,
    /// What the Filter Engine actually did (stage skips are reported
    /// here, not raised as errors).
    pub filter_report: FilterReport,
    pub boundaries: ElevatorBoundaries,
    pub iso_stats: IsoStats,
}

/// Run the full pipeline over a raw recording.
///
/// Time is re-derived as `index / sample_rate` regardless of what the
/// source claimed, so a sample-rate change rescales every derived value.
pub fn recompute(
    raw: &[Sample],
    config: &FilterConfig,
    sample_rate: f64,
) -> Result<DerivedState, ProcessingError> {
    if sample_rate <= 0.0 {
        return Err(ProcessingError::InvalidSampleRate(sample_rate));
    }

    let retimed: Vec<Sample> = raw
        .iter()
        .enumerate()
        .map(|(i, s)| Sample {
            time: i as f64 / sample_rate,
            ..*s
        })
        .collect();

    let (filtered, filter_report) = apply_filters(&retimed, sample_rate, config);

    let accel_z: Vec<f64> = filtered.iter().map(|s| s.az).collect();
    let kinematics = integrate(&accel_z, sample_rate, DriftCorrection::MeanDetrend);

    let processed: Vec<ProcessedDataPoint> = filtered
        .iter()
        .enumerate()
        .map(|(i, s)| ProcessedDataPoint {
            time: s.time,
            ax: s.ax,
            ay: s.ay,
            az: s.az,
            vz: kinematics.vz[i],
            sz: kinematics.sz[i],
        })
        .collect();

    let boundaries = detect(&processed, sample_rate);
    let iso_stats = compute_iso_stats(&processed, &boundaries);

    tracing::info!(
        samples = processed.len(),
        filtered = filter_report.enabled,
        degraded = filter_report.degraded(),
        boundaries_valid = boundaries.is_valid,
        "pipeline recompute complete"
    );

    Ok(DerivedState {
        processed,
        filter_report,
        boundaries,
        iso_stats,
    })
}

// ============================================================================
// Spectral window selection
// ============================================================================

/// How to pick the slice of the recording handed to the Spectral Analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WindowMode {
    /// Fixed-duration slice at a user-chosen start time.
    Fixed,
    /// The whole [t1, t2] constant-velocity plateau. Falls back to the
    /// fixed window when boundaries are invalid.
    ConstVel,
}

/// User window selection for spectral analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSelection {
    pub mode: WindowMode,
    /// Fixed-window start (s)
    pub start: f64,
    /// Fixed-window duration (s)
    pub duration: f64,
}

impl Default for WindowSelection {
    fn default() -> Self {
        Self {
            mode: WindowMode::Fixed,
            start: 0.0,
            duration: 4.0,
        }
    }
}

/// Resolve a window selection to a contiguous slice of the processed
/// series. Out-of-range windows clamp to the recording; an empty
/// intersection yields an empty slice.
pub fn select_window<'a>(
    processed: &'a [ProcessedDataPoint],
    boundaries: &ElevatorBoundaries,
    selection: &WindowSelection,
    sample_rate: f64,
) -> &'a [ProcessedDataPoint] {
    if processed.is_empty() || sample_rate <= 0.0 {
        return &[];
    }

    let (t_start, t_end) = match selection.mode {
        WindowMode::ConstVel if boundaries.is_valid => (boundaries.t1, boundaries.t2),
        WindowMode::ConstVel | WindowMode::Fixed => {
            (selection.start, selection.start + selection.duration)
        }
    };

    let start = ((t_start * sample_rate).floor().max(0.0) as usize).min(processed.len());
    let end = ((t_end * sample_rate).floor().max(0.0) as usize).min(processed.len());
    &processed[start..end.max(start)]
}
