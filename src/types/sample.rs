//! Raw and processed sample types

use serde::{Deserialize, Serialize};

/// One triaxial acceleration sample.
///
/// Acceleration is in Gals (cm/s²). `time` is always derived as
/// `index / sample_rate`, never taken from the source file — uniform
/// spacing is required by the filters and the FFT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Time (s), index / sample_rate
    pub time: f64,
    /// Lateral acceleration, car x axis (Gal)
    pub ax: f64,
    /// Lateral acceleration, car y axis (Gal)
    pub ay: f64,
    /// Vertical acceleration (Gal)
    pub az: f64,
}

/// A [`Sample`] extended with integrated vertical kinematics.
///
/// Produced once per pipeline run; downstream stages treat it as read-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDataPoint {
    pub time: f64,
    /// Lateral acceleration x (Gal)
    pub ax: f64,
    /// Lateral acceleration y (Gal)
    pub ay: f64,
    /// Vertical acceleration (Gal)
    pub az: f64,
    /// Vertical velocity (cm/s)
    pub vz: f64,
    /// Vertical displacement (cm)
    pub sz: f64,
}

/// Selectable data channel of a [`ProcessedDataPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Ax,
    Ay,
    Az,
    Vz,
    Sz,
}

impl Channel {
    /// The three acceleration channels, in x/y/z order.
    pub const ACCELERATION: [Channel; 3] = [Channel::Ax, Channel::Ay, Channel::Az];

    /// All five channels.
    pub const ALL: [Channel; 5] = [
        Channel::Ax,
        Channel::Ay,
        Channel::Az,
        Channel::Vz,
        Channel::Sz,
    ];

    /// Extract this channel's value from a processed point.
    pub fn value(self, point: &ProcessedDataPoint) -> f64 {
        match self {
            Channel::Ax => point.ax,
            Channel::Ay => point.ay,
            Channel::Az => point.az,
            Channel::Vz => point.vz,
            Channel::Sz => point.sz,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Ax => "ax",
            Channel::Ay => "ay",
            Channel::Az => "az",
            Channel::Vz => "vz",
            Channel::Sz => "sz",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
