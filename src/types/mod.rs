//! Core value types shared across the pipeline

mod sample;
mod stats;

pub use sample::{Channel, ProcessedDataPoint, Sample};
pub use stats::{AxisStats, AxisSummary, ElevatorBoundaries, IsoStats, TimedValue};
