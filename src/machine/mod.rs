//! Traction machine reference data and theoretical excitation frequencies
//!
//! The vendor machine table ships with the binary (`data/machines.csv`)
//! and is parsed once into an immutable table at startup. Theoretical
//! frequencies are a pure function of the machine geometry, rated speed,
//! and rope type — fully independent of measured data — and are meant to
//! be overlaid on the measured spectrum to attribute peaks to mechanical
//! or electrical sources.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Rope-lay constant for conventional wire rope.
const ROPE_LAY_NORMAL: f64 = 6.5;

/// Rope-lay constant for low-elongation (s-flex) rope.
const ROPE_LAY_SFLEX: f64 = 7.3;

/// Millimetres to metres. The vendor table stores diameters in mm; the
/// frequency formulas use metres. The conversion happens exactly once,
/// inside [`theoretical_freqs`].
const MM_TO_M: f64 = 1e-3;

/// Suspension rope construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RopeType {
    /// Conventional steel wire rope (lay constant 6.5)
    Normal,
    /// Low-elongation flexible rope (lay constant 7.3)
    Sflex,
}

impl RopeType {
    fn lay_constant(self) -> f64 {
        match self {
            RopeType::Normal => ROPE_LAY_NORMAL,
            RopeType::Sflex => ROPE_LAY_SFLEX,
        }
    }
}

/// One traction machine from the vendor reference table.
///
/// Static identity data — never derived from measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSpec {
    /// Elevator series (e.g. "MAXIEZ-M")
    pub series: String,
    /// Traction machine model (e.g. "PMF018S")
    pub model: String,
    /// Roping ratio (1 for 1:1, 2 for 2:1)
    pub roping: u32,
    /// Sheave nominal diameter (mm)
    pub sheave_diameter_mm: f64,
    /// Motor slot count
    pub slots: u32,
    /// Magnet (pole) count
    pub poles: u32,
    /// Traction rope diameter (mm)
    pub rope_diameter_mm: f64,
}

/// Expected excitation frequencies for a machine at a given speed.
///
/// Recomputed whenever machine selection, speed, or rope type changes;
/// independent of the measurement pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalFreqs {
    /// Rope-strand meshing frequency (Hz)
    pub f1: f64,
    /// Secondary (2:1 diverter) sheave meshing, f1/2 — meaningful only
    /// for 2:1 roping
    pub f2: f64,
    /// Sheave rotation frequency (Hz)
    pub f3: f64,
    /// Torque-ripple / slot-passing frequency (Hz)
    pub fs: f64,
    /// Motor electrical fundamental (Hz)
    pub f1elec: f64,
    /// 2nd electrical harmonic (Hz)
    pub f2elec: f64,
    /// 6th electrical harmonic (Hz)
    pub f6elec: f64,
}

impl TheoreticalFreqs {
    /// Named (label, frequency) pairs, for overlay and report rendering.
    pub fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("f1 rope meshing", self.f1),
            ("f2 diverter meshing", self.f2),
            ("f3 sheave rotation", self.f3),
            ("fs slot passing", self.fs),
            ("1f electrical", self.f1elec),
            ("2f electrical", self.f2elec),
            ("6f electrical", self.f6elec),
        ]
    }
}

/// The machine table, embedded at compile time.
const MACHINE_TABLE_CSV: &str = include_str!("../../data/machines.csv");

static MACHINES: OnceLock<Vec<MachineSpec>> = OnceLock::new();

/// The immutable machine reference table.
pub fn machines() -> &'static [MachineSpec] {
    MACHINES.get_or_init(|| parse_table(MACHINE_TABLE_CSV))
}

/// Look up a machine by model name (exact, case-insensitive).
///
/// Some models appear under several series with identical geometry; the
/// first row wins.
pub fn find_machine(model: &str) -> Option<&'static MachineSpec> {
    machines()
        .iter()
        .find(|m| m.model.eq_ignore_ascii_case(model))
}

/// Parse the embedded table. Rows that do not parse are skipped — the
/// table is compiled in, so a bad row is a build-data defect caught by
/// the table tests, not a runtime condition.
fn parse_table(csv: &str) -> Vec<MachineSpec> {
    csv.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let cols: Vec<&str> = line.split(',').map(str::trim).collect();
            if cols.len() < 8 {
                return None;
            }
            Some(MachineSpec {
                series: cols[0].to_string(),
                model: cols[1].to_string(),
                roping: cols[2].parse().ok()?,
                sheave_diameter_mm: cols[3].parse().ok()?,
                slots: cols[4].parse().ok()?,
                poles: cols[5].parse().ok()?,
                rope_diameter_mm: cols[7].parse().ok()?,
            })
        })
        .collect()
}

/// Derive the expected excitation frequencies.
///
/// - `f3 = V·N / (π·D_sheave)` — sheave rotation
/// - `f1 = V·N / (D_rope·A)` — rope-strand meshing, A the lay constant
/// - `f2 = f1 / 2` — 2:1 diverter sheave meshing
/// - `fs = f3 · slots` — torque ripple
/// - `f1elec = f3 · poles / 2`, with 2f and 6f harmonics
pub fn theoretical_freqs(spec: &MachineSpec, rated_speed: f64, rope_type: RopeType) -> TheoreticalFreqs {
    let a = rope_type.lay_constant();
    let v = rated_speed;
    let n = f64::from(spec.roping);
    let sheave_m = spec.sheave_diameter_mm * MM_TO_M;
    let rope_m = spec.rope_diameter_mm * MM_TO_M;

    let f3 = (v * n) / (sheave_m * std::f64::consts::PI);
    let f1 = (v * n) / (rope_m * a);
    let f2 = f1 / 2.0;
    let fs = f3 * f64::from(spec.slots);
    let f1elec = f3 * f64::from(spec.poles) / 2.0;

    TheoreticalFreqs {
        f1,
        f2,
        f3,
        fs,
        f1elec,
        f2elec: 2.0 * f1elec,
        f6elec: 6.0 * f1elec,
    }
}
