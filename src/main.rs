//! LiftMetrics CLI — elevator ride-quality analyzer
//!
//! Loads a portable-vibrometer CSV, runs the analysis pipeline, and
//! prints an ISO 18738 / GB/T 24474 report.
//!
//! # Usage
//!
//! ```bash
//! # Analyze with defaults (1600 Hz, no filtering)
//! liftmetrics ride.csv
//!
//! # GB/T 24474 standard weighting (10 Hz low-pass)
//! liftmetrics ride.csv --standard
//!
//! # Custom band, z axis only, constant-velocity FFT window
//! liftmetrics ride.csv --low-pass 30 --high-pass 0.5 --z-only --const-vel
//!
//! # Theoretical overlay for a known machine
//! liftmetrics ride.csv --machine PMF018S --rated-speed 1.75
//!
//! # Machine-readable output
//! liftmetrics ride.csv --json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use liftmetrics::pipeline::{self, WindowMode, WindowSelection};
use liftmetrics::{acquisition, machine, processing, report::RideReport, AnalysisConfig, FilterConfig, TargetAxes};

#[derive(Parser, Debug)]
#[command(name = "liftmetrics")]
#[command(about = "Elevator ride-quality analysis per ISO 18738 / GB/T 24474")]
#[command(version)]
struct CliArgs {
    /// Recording to analyze (CSV with ax, ay, az columns)
    input: PathBuf,

    /// Analysis config TOML; CLI flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Capture sample rate (Hz)
    #[arg(long, value_name = "HZ")]
    sample_rate: Option<f64>,

    /// Enable band filtering with this low-pass cutoff (Hz)
    #[arg(long, value_name = "HZ")]
    low_pass: Option<f64>,

    /// High-pass cutoff (Hz); implies filtering enabled
    #[arg(long, value_name = "HZ")]
    high_pass: Option<f64>,

    /// Apply the GB/T 24474 standard-weighting preset (10 Hz low-pass)
    #[arg(long, conflicts_with_all = ["low_pass", "high_pass"])]
    standard: bool,

    /// Restrict filtering to the vertical axis
    #[arg(long)]
    z_only: bool,

    /// Enable Kalman smoothing (Q/R from config or defaults)
    #[arg(long)]
    kalman: bool,

    /// FFT window start (s)
    #[arg(long, default_value_t = 0.0, value_name = "SECS")]
    window_start: f64,

    /// FFT window duration (s)
    #[arg(long, default_value_t = 4.0, value_name = "SECS")]
    window_secs: f64,

    /// Use the constant-velocity plateau as the FFT window
    #[arg(long)]
    const_vel: bool,

    /// Traction machine model for the theoretical overlay
    #[arg(long, value_name = "MODEL")]
    machine: Option<String>,

    /// Rated car speed (m/s), required with --machine
    #[arg(long, value_name = "M_PER_S")]
    rated_speed: Option<f64>,

    /// Rope type for the overlay: normal or sflex
    #[arg(long, default_value = "normal", value_name = "TYPE")]
    rope_type: String,

    /// Emit the full report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            AnalysisConfig::from_toml(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };

    apply_flag_overrides(&mut config, &args)?;

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading recording {}", args.input.display()))?;
    let raw = acquisition::parse_csv(&text, config.sample_rate)
        .with_context(|| format!("parsing recording {}", args.input.display()))?;
    if raw.is_empty() {
        bail!("recording {} holds no samples", args.input.display());
    }
    info!(samples = raw.len(), sample_rate = config.sample_rate, "recording loaded");

    let state = pipeline::recompute(&raw, &config.filter, config.sample_rate)?;

    let selection = WindowSelection {
        mode: if args.const_vel {
            WindowMode::ConstVel
        } else {
            WindowMode::Fixed
        },
        start: args.window_start,
        duration: args.window_secs,
    };
    let window = pipeline::select_window(
        &state.processed,
        &state.boundaries,
        &selection,
        config.sample_rate,
    );
    let series: Vec<f64> = window.iter().map(|p| p.az).collect();
    let spectrum = processing::compute_fft(&series, config.sample_rate);
    let window_stats = match (window.first(), window.last()) {
        (Some(first), Some(last)) => processing::axis_stats(
            &state.processed,
            liftmetrics::Channel::Az,
            first.time,
            last.time,
        ),
        _ => None,
    };

    let theoretical = match &config.machine {
        Some(chosen) => {
            let spec = machine::find_machine(&chosen.model).with_context(|| {
                format!("machine model '{}' not in reference table", chosen.model)
            })?;
            Some(machine::theoretical_freqs(
                spec,
                chosen.rated_speed,
                chosen.rope_type,
            ))
        }
        None => None,
    };

    let report = RideReport::new(
        args.input.display().to_string(),
        config.sample_rate,
        state,
        spectrum,
        window_stats,
        theoretical,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }

    Ok(())
}

/// Overlay CLI flags onto the (file or default) config.
fn apply_flag_overrides(config: &mut AnalysisConfig, args: &CliArgs) -> Result<()> {
    if let Some(rate) = args.sample_rate {
        config.sample_rate = rate;
    }

    if args.standard {
        config.filter = FilterConfig::standard_weighting();
    }
    if let Some(cutoff) = args.low_pass {
        config.filter.enabled = true;
        config.filter.low_pass_freq = cutoff;
    }
    if let Some(cutoff) = args.high_pass {
        config.filter.enabled = true;
        config.filter.high_pass_freq = cutoff;
    }
    if args.z_only {
        config.filter.target_axes = TargetAxes::ZOnly;
    }
    if args.kalman {
        config.filter.enabled = true;
        config.filter.enable_kalman = true;
    }

    if let Some(model) = &args.machine {
        let rated_speed = args
            .rated_speed
            .context("--machine requires --rated-speed")?;
        let rope_type = match args.rope_type.as_str() {
            "normal" => liftmetrics::RopeType::Normal,
            "sflex" => liftmetrics::RopeType::Sflex,
            other => bail!("unknown rope type '{other}' (expected normal or sflex)"),
        };
        config.machine = Some(liftmetrics::config::MachineSelection {
            model: model.clone(),
            rated_speed,
            rope_type,
        });
    }

    Ok(())
}
