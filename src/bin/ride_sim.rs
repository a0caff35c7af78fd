//! Synthetic elevator ride generator
//!
//! Produces a CSV recording in the analyzer's ingestion format: half-sine
//! acceleration and deceleration ramps around a constant-velocity cruise,
//! with a vibration tone and Gaussian sensor noise on every axis. Useful
//! for demos and for exercising the pipeline without instrument data.
//!
//! # Usage
//! ```bash
//! ride-sim --duration 12 --out demo_ride.csv
//! ride-sim | liftmetrics /dev/stdin --low-pass 30
//! ```

use clap::Parser;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;
use std::io::{self, BufWriter, Write};

// ============================================================================
// Ride Constants
// ============================================================================

/// Acceleration/deceleration ramp duration (s)
const RAMP_SECS: f64 = 2.5;
/// Peak ramp acceleration (Gal)
const RAMP_PEAK_GAL: f64 = 40.0;
/// Vertical vibration tone amplitude (Gal)
const VIBRATION_GAL: f64 = 3.0;
/// Horizontal sway amplitudes (Gal)
const SWAY_X_GAL: f64 = 1.5;
const SWAY_Y_GAL: f64 = 1.2;
/// Horizontal sway frequencies (Hz)
const SWAY_X_HZ: f64 = 2.0;
const SWAY_Y_HZ: f64 = 3.0;
/// Sensor noise standard deviation (Gal)
const NOISE_SIGMA_GAL: f64 = 1.2;

#[derive(Parser, Debug)]
#[command(name = "ride-sim")]
#[command(about = "Synthetic elevator ride CSV generator for liftmetrics")]
#[command(version)]
struct Args {
    /// Ride duration in seconds (must fit both ramps)
    #[arg(short, long, default_value_t = 12.0)]
    duration: f64,

    /// Sample rate (Hz)
    #[arg(short, long, default_value_t = 1600.0)]
    sample_rate: f64,

    /// Vertical vibration tone frequency (Hz)
    #[arg(long, default_value_t = 15.0)]
    vibration_freq: f64,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    out: Option<std::path::PathBuf>,

    /// RNG seed for reproducible recordings
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    anyhow::ensure!(
        args.duration > 2.0 * RAMP_SECS,
        "duration must exceed {} s to fit both ramps",
        2.0 * RAMP_SECS
    );
    anyhow::ensure!(args.sample_rate > 0.0, "sample rate must be > 0");

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let noise = Normal::new(0.0, NOISE_SIGMA_GAL)?;

    let writer: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    writeln!(writer, "ax,ay,az")?;

    let n = (args.duration * args.sample_rate) as usize;
    for i in 0..n {
        let t = i as f64 / args.sample_rate;

        // Half-sine ramp up, cruise, mirrored ramp down
        let base_az = if t < RAMP_SECS {
            RAMP_PEAK_GAL * (PI * t / RAMP_SECS).sin()
        } else if t > args.duration - RAMP_SECS {
            -RAMP_PEAK_GAL * (PI * (t - (args.duration - RAMP_SECS)) / RAMP_SECS).sin()
        } else {
            0.0
        };

        let az = base_az
            + VIBRATION_GAL * (2.0 * PI * args.vibration_freq * t).sin()
            + noise.sample(&mut rng);
        let ax = SWAY_X_GAL * (2.0 * PI * SWAY_X_HZ * t).sin() + noise.sample(&mut rng) * 0.6;
        let ay = SWAY_Y_GAL * (2.0 * PI * SWAY_Y_HZ * t).sin() + noise.sample(&mut rng) * 0.6;

        writeln!(writer, "{ax:.4},{ay:.4},{az:.4}")?;
    }

    writer.flush()?;
    eprintln!(
        "wrote {} samples ({} s at {} Hz)",
        n, args.duration, args.sample_rate
    );
    Ok(())
}
