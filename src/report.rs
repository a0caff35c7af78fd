//! Ride analysis report
//!
//! Assembles the derived state, spectral result, and theoretical overlay
//! into one record plus a plain-text rendering. This is the statistics
//! record an external diagnosis collaborator consumes; the qualitative
//! verdict itself is out of scope here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::machine::TheoreticalFreqs;
use crate::pipeline::DerivedState;
use crate::processing::{dominant_frequency, FftResult, SpectrumPoint};
use crate::types::AxisStats;

/// Relative tolerance when attributing a measured peak to a theoretical
/// excitation line.
const ATTRIBUTION_TOLERANCE: f64 = 0.05;

/// Complete analysis record for one recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub sample_rate: f64,
    #[serde(flatten)]
    pub state: DerivedState,
    /// Spectrum of the selected analysis window
    pub spectrum: FftResult,
    pub dominant: Option<SpectrumPoint>,
    /// Vertical-axis statistics over the same analysis window
    pub window_stats: Option<AxisStats>,
    /// Theoretical overlay, when machine parameters were supplied
    pub theoretical: Option<TheoreticalFreqs>,
}

impl RideReport {
    pub fn new(
        source: impl Into<String>,
        sample_rate: f64,
        state: DerivedState,
        spectrum: FftResult,
        window_stats: Option<AxisStats>,
        theoretical: Option<TheoreticalFreqs>,
    ) -> Self {
        let dominant = dominant_frequency(&spectrum);
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            sample_rate,
            state,
            spectrum,
            dominant,
            window_stats,
            theoretical,
        }
    }

    /// Attribute the dominant measured peak to the nearest theoretical
    /// line within tolerance, if any.
    pub fn attribution(&self) -> Option<(&'static str, f64)> {
        let peak = self.dominant?;
        let theoretical = self.theoretical.as_ref()?;
        theoretical
            .named()
            .into_iter()
            .filter(|(_, f)| *f > 0.0)
            .map(|(name, f)| (name, f, (peak.frequency - f).abs() / f))
            .filter(|(_, _, rel)| *rel <= ATTRIBUTION_TOLERANCE)
            .min_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, f, _)| (name, f))
    }

    /// Render the report as plain text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Elevator Ride Quality Analysis\n");
        out.push_str("==============================\n");
        out.push_str(&format!("Source: {}\n", self.source));
        out.push_str(&format!("Sample rate: {:.0} Hz\n", self.sample_rate));
        out.push_str(&format!(
            "Samples: {} ({:.2} s)\n",
            self.state.processed.len(),
            self.state.processed.len() as f64 / self.sample_rate
        ));
        if self.state.filter_report.degraded() {
            out.push_str("NOTE: one or more filter stages were skipped (invalid cutoff)\n");
        }
        out.push('\n');

        let b = &self.state.boundaries;
        if b.is_valid {
            out.push_str(&format!(
                "Ride phases: t0 {:.2} s | t1 {:.2} s | t2 {:.2} s | t3 {:.2} s\n\n",
                b.t0, b.t1, b.t2, b.t3
            ));
        } else {
            out.push_str("Ride phases: no constant-velocity plateau found\n\n");
        }

        out.push_str("ISO 18738 / GB/T 24474 statistics (Gal)\n");
        out.push_str("Constant-velocity segment (t1-t2):\n");
        for (axis, summary) in [
            ("X", &self.state.iso_stats.x),
            ("Y", &self.state.iso_stats.y),
            ("Z", &self.state.iso_stats.z),
        ] {
            match &summary.const_vel {
                Some(stats) => out.push_str(&format!("  {axis}: {}\n", Self::stats_line(stats))),
                None => out.push_str(&format!("  {axis}: (unavailable)\n")),
            }
        }
        if let Some(global) = &self.state.iso_stats.z.global {
            let scope = if b.is_valid {
                "t0-t3"
            } else {
                "full recording"
            };
            out.push_str(&format!("Whole ride ({scope}):\n  Z: {}\n", Self::stats_line(global)));
        }
        out.push('\n');

        if let Some(window) = &self.window_stats {
            out.push_str(&format!(
                "Analysis window (Z): rms {:.3} | peak {:.3}\n",
                window.rms, window.peak_val
            ));
        }
        match self.dominant {
            Some(peak) => {
                out.push_str(&format!(
                    "Dominant frequency: {:.2} Hz (magnitude {:.4})\n",
                    peak.frequency, peak.magnitude
                ));
            }
            None => out.push_str("Dominant frequency: (no spectrum)\n"),
        }

        if let Some(theoretical) = &self.theoretical {
            out.push_str("\nTheoretical excitation frequencies:\n");
            for (name, freq) in theoretical.named() {
                out.push_str(&format!("  {name}: {freq:.2} Hz\n"));
            }
            match self.attribution() {
                Some((name, freq)) => out.push_str(&format!(
                    "Dominant peak matches {name} ({freq:.2} Hz)\n"
                )),
                None => {
                    out.push_str("Dominant peak matches no theoretical line within 5%\n");
                }
            }
        }

        out
    }

    fn stats_line(stats: &AxisStats) -> String {
        format!(
            "a95 {:.3} | pk-pk {:.3} | 0-pk {:.3} | rms {:.3}",
            stats.a95, stats.pk_pk, stats.zero_pk, stats.rms
        )
    }
}
