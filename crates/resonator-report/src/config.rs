//! Job configuration
//!
//! A job is a cavity plus output settings, read from JSON and optionally
//! overridden from the command line.

use crate::{ReportError, Result};
use resonator_model::region::{DEFAULT_GRID_POINTS, DEFAULT_G_MAX, DEFAULT_G_MIN};
use resonator_model::{Cavity, DEFAULT_WAVELENGTH_M};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Reference design: L = 0.5 m, R1 = R2 = 0.8 m
pub const REFERENCE_LENGTH_M: f64 = 0.5;
pub const REFERENCE_RADIUS_M: f64 = 0.8;

/// Envelope samples across the cavity
pub const DEFAULT_ENVELOPE_POINTS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub cavity: Cavity,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_envelope_points")]
    pub envelope_points: usize,
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,
    #[serde(default = "default_g_min")]
    pub g_min: f64,
    #[serde(default = "default_g_max")]
    pub g_max: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            envelope_points: DEFAULT_ENVELOPE_POINTS,
            grid_points: DEFAULT_GRID_POINTS,
            g_min: DEFAULT_G_MIN,
            g_max: DEFAULT_G_MAX,
        }
    }
}

fn default_envelope_points() -> usize {
    DEFAULT_ENVELOPE_POINTS
}
fn default_grid_points() -> usize {
    DEFAULT_GRID_POINTS
}
fn default_g_min() -> f64 {
    DEFAULT_G_MIN
}
fn default_g_max() -> f64 {
    DEFAULT_G_MAX
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            cavity: reference_cavity(),
            output: OutputConfig::default(),
        }
    }
}

/// Parameters given on the command line. `None` keeps the job value.
#[derive(Debug, Clone, Copy, Default)]
pub struct CavityOverrides {
    pub length: Option<f64>,
    pub radius1: Option<f64>,
    pub radius2: Option<f64>,
    pub wavelength: Option<f64>,
}

impl CavityOverrides {
    pub fn is_empty(&self) -> bool {
        self.length.is_none()
            && self.radius1.is_none()
            && self.radius2.is_none()
            && self.wavelength.is_none()
    }
}

impl JobConfig {
    /// Apply overrides, re-validating the resulting cavity.
    pub fn with_overrides(mut self, overrides: CavityOverrides) -> Result<Self> {
        if overrides.is_empty() {
            return Ok(self);
        }
        let base = self.cavity;
        self.cavity = Cavity::new(
            overrides.length.unwrap_or(base.length()),
            overrides.radius1.unwrap_or(base.radius1()),
            overrides.radius2.unwrap_or(base.radius2()),
            overrides.wavelength.unwrap_or(base.wavelength()),
        )?;
        Ok(self)
    }
}

/// Build a job from overrides alone. All three geometry values are needed
/// unless none is given, in which case the reference design is used.
pub fn job_from_overrides(overrides: CavityOverrides) -> Result<JobConfig> {
    if overrides.length.is_none() && overrides.radius1.is_none() && overrides.radius2.is_none() {
        return JobConfig::default().with_overrides(overrides);
    }

    let length = overrides.length.ok_or(ReportError::MissingParameter("length"))?;
    let radius1 = overrides.radius1.ok_or(ReportError::MissingParameter("r1"))?;
    let radius2 = overrides.radius2.ok_or(ReportError::MissingParameter("r2"))?;
    let wavelength = overrides.wavelength.unwrap_or(DEFAULT_WAVELENGTH_M);

    Ok(JobConfig {
        cavity: Cavity::new(length, radius1, radius2, wavelength)?,
        output: OutputConfig::default(),
    })
}

pub fn reference_cavity() -> Cavity {
    Cavity::new(
        REFERENCE_LENGTH_M,
        REFERENCE_RADIUS_M,
        REFERENCE_RADIUS_M,
        DEFAULT_WAVELENGTH_M,
    )
    .expect("reference cavity constants are valid")
}

/// Load a job from a JSON file. The cavity is validated while parsing.
pub fn load_job(path: impl AsRef<Path>) -> Result<JobConfig> {
    let path = path.as_ref();
    info!("Loading job from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let job: JobConfig = serde_json::from_reader(reader)?;
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_job_with_defaults() {
        let json = r#"{"cavity": {"length": 0.5, "radius1": 0.8, "radius2": 0.8}}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let job = load_job(file.path()).unwrap();
        assert!((job.cavity.radius1() - REFERENCE_RADIUS_M).abs() < 1e-15);
        assert_eq!(job.cavity.wavelength(), DEFAULT_WAVELENGTH_M);
        assert_eq!(job.output, OutputConfig::default());
    }

    #[test]
    fn test_load_job_partial_output() {
        let json = r#"{
            "cavity": {"length": 1.0, "radius1": 2.0, "radius2": 1e10, "wavelength": 632.8e-9},
            "output": {"envelope_points": 250}
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let job = load_job(file.path()).unwrap();
        assert!((job.cavity.wavelength() - 632.8e-9).abs() < 1e-20);
        assert_eq!(job.output.envelope_points, 250);
        assert_eq!(job.output.grid_points, DEFAULT_GRID_POINTS);
    }

    #[test]
    fn test_load_job_rejects_zero_radius() {
        let json = r#"{"cavity": {"length": 0.5, "radius1": 0.0, "radius2": 0.8}}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert!(matches!(load_job(file.path()), Err(ReportError::Json(_))));
    }

    #[test]
    fn test_overrides_replace_fields() {
        let job = JobConfig::default()
            .with_overrides(CavityOverrides {
                length: Some(2.0),
                radius1: Some(0.5),
                radius2: Some(0.5),
                wavelength: None,
            })
            .unwrap();
        assert_eq!(job.cavity.length(), 2.0);
        assert_eq!(job.cavity.wavelength(), DEFAULT_WAVELENGTH_M);
    }

    #[test]
    fn test_overrides_revalidate() {
        let result = JobConfig::default().with_overrides(CavityOverrides {
            length: Some(-1.0),
            ..Default::default()
        });
        assert!(matches!(result, Err(ReportError::Model(_))));
    }

    #[test]
    fn test_job_from_overrides_requires_geometry() {
        let err = job_from_overrides(CavityOverrides {
            length: Some(1.0),
            radius1: Some(1.0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ReportError::MissingParameter("r2")));

        let job = job_from_overrides(CavityOverrides::default()).unwrap();
        assert_eq!(job.cavity, reference_cavity());
    }
}
