//! Analysis configuration
//!
//! All tunable parameters of the pipeline live here, deserializable from
//! TOML so operators tune recordings without recompiling. Defaults match
//! the portable-vibrometer capture settings (1600 Hz, 30 Hz display
//! low-pass).
//!
//! ## Usage
//!
//! ```ignore
//! let config = AnalysisConfig::from_toml(&std::fs::read_to_string(path)?)?;
//! let state = pipeline::recompute(&raw, &config.filter, config.sample_rate)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::machine::RopeType;

/// Default capture sample rate of the portable vibrometer (Hz).
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 1600.0;

/// Default display low-pass cutoff (Hz).
pub const DEFAULT_LOW_PASS_HZ: f64 = 30.0;

/// GB/T 24474 standard-weighting low-pass cutoff (Hz).
pub const STANDARD_WEIGHTING_LOW_PASS_HZ: f64 = 10.0;

/// Default Kalman process-noise covariance.
pub const DEFAULT_KALMAN_Q: f64 = 0.01;

/// Default Kalman measurement-noise covariance.
pub const DEFAULT_KALMAN_R: f64 = 1.0;

/// Which axes the band-shaping and Kalman stages touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetAxes {
    /// Filter all three acceleration axes.
    #[serde(rename = "all")]
    All,
    /// Filter the vertical axis only; x/y pass through untouched.
    #[serde(rename = "z-only")]
    ZOnly,
}

/// Filter Engine configuration.
///
/// Immutable value passed into the pipeline; never mutated mid-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Gate for the whole band-shaping + Kalman stage.
    pub enabled: bool,
    /// High-pass cutoff (Hz). `<= 0` disables the high-pass stage.
    pub high_pass_freq: f64,
    /// Low-pass cutoff (Hz). `<= 0` or `>= Nyquist` disables the stage.
    pub low_pass_freq: f64,
    pub target_axes: TargetAxes,
    /// Set when the config is the GB/T 24474 preset, so results are
    /// flagged as standard-weighted rather than free exploration.
    pub is_standard_weighting: bool,
    pub enable_kalman: bool,
    /// Process noise covariance. Larger = more responsive, less smoothing.
    pub kalman_q: f64,
    /// Measurement noise covariance. Larger = smoother, more lag.
    pub kalman_r: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            high_pass_freq: 0.0,
            low_pass_freq: DEFAULT_LOW_PASS_HZ,
            target_axes: TargetAxes::All,
            is_standard_weighting: false,
            enable_kalman: false,
            kalman_q: DEFAULT_KALMAN_Q,
            kalman_r: DEFAULT_KALMAN_R,
        }
    }
}

impl FilterConfig {
    /// The GB/T 24474 preset: 10 Hz low-pass, all axes, no Kalman.
    pub fn standard_weighting() -> Self {
        Self {
            enabled: true,
            high_pass_freq: 0.0,
            low_pass_freq: STANDARD_WEIGHTING_LOW_PASS_HZ,
            target_axes: TargetAxes::All,
            is_standard_weighting: true,
            enable_kalman: false,
            kalman_q: DEFAULT_KALMAN_Q,
            kalman_r: DEFAULT_KALMAN_R,
        }
    }
}

/// Machine selection for the theoretical frequency overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSelection {
    /// Traction machine model, looked up in the reference table.
    pub model: String,
    /// Rated car speed (m/s).
    pub rated_speed: f64,
    pub rope_type: RopeType,
}

/// Top-level analysis configuration, loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Capture sample rate (Hz). Rescales every derived time value;
    /// changing it requires a full pipeline re-run.
    pub sample_rate: f64,
    pub filter: FilterConfig,
    /// Optional machine parameters for the theoretical overlay.
    pub machine: Option<MachineSelection>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE_HZ,
            filter: FilterConfig::default(),
            machine: None,
        }
    }
}

impl AnalysisConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_capture_settings() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sample_rate, 1600.0);
        assert_eq!(config.filter.low_pass_freq, 30.0);
        assert!(!config.filter.enabled);
        assert!(config.machine.is_none());
    }

    #[test]
    fn test_standard_weighting_preset() {
        let preset = FilterConfig::standard_weighting();
        assert!(preset.enabled);
        assert!(preset.is_standard_weighting);
        assert_eq!(preset.low_pass_freq, 10.0);
        assert_eq!(preset.high_pass_freq, 0.0);
        assert_eq!(preset.target_axes, TargetAxes::All);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = AnalysisConfig::from_toml(
            r#"
            sample_rate = 800.0

            [filter]
            enabled = true
            low_pass_freq = 10.0
            target_axes = "z-only"
            "#,
        )
        .expect("valid TOML");
        assert_eq!(config.sample_rate, 800.0);
        assert!(config.filter.enabled);
        assert_eq!(config.filter.target_axes, TargetAxes::ZOnly);
        // Unspecified fields keep their defaults
        assert_eq!(config.filter.kalman_r, DEFAULT_KALMAN_R);
    }

    #[test]
    fn test_from_toml_machine_selection() {
        let config = AnalysisConfig::from_toml(
            r#"
            [machine]
            model = "PMF018S"
            rated_speed = 1.75
            rope_type = "normal"
            "#,
        )
        .expect("valid TOML");
        let machine = config.machine.expect("machine section parsed");
        assert_eq!(machine.model, "PMF018S");
        assert_eq!(machine.rope_type, RopeType::Normal);
    }
}
