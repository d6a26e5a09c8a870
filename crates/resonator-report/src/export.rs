//! File outputs for plotting tools

use crate::{CavityReport, Result};
use resonator_model::{BeamSample, StabilityMap, StabilityResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// The design's position on the stability chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DesignPoint {
    pub g1: f64,
    pub g2: f64,
    pub product: f64,
    /// False when the point falls outside the sampled window
    pub in_window: bool,
}

/// Stability-region grid plus the marked design point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityChart {
    pub design_point: DesignPoint,
    pub stable_fraction: f64,
    pub map: StabilityMap,
}

impl StabilityChart {
    pub fn new(map: StabilityMap, stability: &StabilityResult) -> Self {
        let design_point = DesignPoint {
            g1: stability.g1,
            g2: stability.g2,
            product: stability.product,
            in_window: map.contains(stability.g1, stability.g2),
        };
        Self {
            design_point,
            stable_fraction: map.stable_fraction(),
            map,
        }
    }
}

pub fn write_report_json(path: impl AsRef<Path>, report: &CavityReport) -> Result<()> {
    let path = path.as_ref();
    info!("Writing report to {:?}", path);
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    Ok(())
}

/// `z_m,radius_m` rows, one per sample.
pub fn write_envelope_csv(path: impl AsRef<Path>, samples: &[BeamSample]) -> Result<()> {
    let path = path.as_ref();
    info!("Writing {} envelope samples to {:?}", samples.len(), path);

    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "z_m,radius_m")?;
    for sample in samples {
        writeln!(writer, "{:e},{:e}", sample.z, sample.radius)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_stability_chart(path: impl AsRef<Path>, chart: &StabilityChart) -> Result<()> {
    let path = path.as_ref();
    info!(
        "Writing {}x{} stability grid to {:?}",
        chart.map.points, chart.map.points, path
    );
    let mut writer = BufWriter::new(File::create(path)?);
    // Compact: the default grid is 250k cells
    serde_json::to_writer(&mut writer, chart)?;
    writer.flush()?;
    Ok(())
}
