//! Cavity Report CLI
//!
//! Analyses a two-mirror resonator and prints the stability verdict and
//! fundamental-mode geometry.
//!
//! Usage:
//!   cavity-report --length 0.5 --r1 0.8 --r2 0.8
//!   cavity-report --config job.json --json report.json \
//!                 --envelope-csv envelope.csv --chart chart.json

use anyhow::Result;
use clap::Parser;
use resonator_model::StabilityMap;
use resonator_report::config::{self, CavityOverrides};
use resonator_report::export::{self, StabilityChart};
use resonator_report::{build_report, render_text};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cavity-report",
    about = "Stability and fundamental-mode report for a two-mirror laser cavity"
)]
struct Args {
    /// JSON job file (cavity + output settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mirror separation L in meters
    #[arg(short = 'L', long)]
    length: Option<f64>,

    /// Radius of curvature of mirror 1 in meters (1e10 for flat)
    #[arg(long, allow_hyphen_values = true)]
    r1: Option<f64>,

    /// Radius of curvature of mirror 2 in meters (1e10 for flat)
    #[arg(long, allow_hyphen_values = true)]
    r2: Option<f64>,

    /// Wavelength in meters
    #[arg(short, long)]
    wavelength: Option<f64>,

    /// Number of beam-envelope samples across the cavity
    #[arg(long)]
    samples: Option<usize>,

    /// Write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the beam envelope as CSV
    #[arg(long)]
    envelope_csv: Option<PathBuf>,

    /// Write the stability-region grid as JSON
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Grid points per axis for the stability chart
    #[arg(long)]
    grid_points: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (RUST_LOG wins over --verbose)
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let overrides = CavityOverrides {
        length: args.length,
        radius1: args.r1,
        radius2: args.r2,
        wavelength: args.wavelength,
    };

    let mut job = match &args.config {
        Some(path) => config::load_job(path)?.with_overrides(overrides)?,
        None => config::job_from_overrides(overrides)?,
    };
    if let Some(samples) = args.samples {
        job.output.envelope_points = samples;
    }
    if let Some(points) = args.grid_points {
        job.output.grid_points = points;
    }

    let report = build_report(&job.cavity, &job.output)?;
    print!("{}", render_text(&report));

    if let Some(path) = &args.json {
        export::write_report_json(path, &report)?;
    }

    if let Some(path) = &args.envelope_csv {
        match &report.beam {
            Some(beam) => export::write_envelope_csv(path, &beam.envelope)?,
            None => warn!("No guided mode, skipping envelope CSV {:?}", path),
        }
    }

    if let Some(path) = &args.chart {
        let map = StabilityMap::sample(job.output.g_min, job.output.g_max, job.output.grid_points)?;
        let chart = StabilityChart::new(map, &report.stability);
        if !chart.design_point.in_window {
            info!(
                "Design point ({:.3}, {:.3}) lies outside the chart window",
                chart.design_point.g1, chart.design_point.g2
            );
        }
        export::write_stability_chart(path, &chart)?;
    }

    Ok(())
}
