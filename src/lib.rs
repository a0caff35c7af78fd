//! LiftMetrics: elevator ride-quality analysis
//!
//! Batch signal-processing pipeline for triaxial elevator vibration
//! recordings per ISO 18738 / GB/T 24474.
//!
//! ## Architecture
//!
//! - **Acquisition**: CSV ingestion of `ax`/`ay`/`az` recordings
//! - **Processing**: Butterworth/Kalman filtering, kinematic integration,
//!   ride-phase boundary detection, segment statistics, FFT, decimation
//! - **Machine**: traction-machine reference table and theoretical
//!   excitation frequencies
//! - **Pipeline**: the pure `recompute` batch function tying it together

pub mod acquisition;
pub mod config;
pub mod machine;
pub mod pipeline;
pub mod processing;
pub mod report;
pub mod types;

// Re-export the core entry points
pub use acquisition::{parse_csv, ParseError};
pub use config::{AnalysisConfig, FilterConfig, TargetAxes};
pub use machine::{find_machine, machines, theoretical_freqs, MachineSpec, RopeType, TheoreticalFreqs};
pub use pipeline::{recompute, select_window, DerivedState, WindowMode, WindowSelection};
pub use processing::{
    compute_fft, decimate, dominant_frequency, FftResult, FilterReport, ProcessingError,
    SpectrumPoint, StageOutcome,
};
pub use report::RideReport;
pub use types::{
    AxisStats, AxisSummary, Channel, ElevatorBoundaries, IsoStats, ProcessedDataPoint, Sample,
    TimedValue,
};
