//! Report assembly and console rendering

use crate::{config::OutputConfig, Result};
use chrono::{DateTime, Utc};
use resonator_model::{analyze, BeamSample, Cavity, ModeGeometry, StabilityRegime, StabilityResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Notice shown instead of the envelope when no mode exists
pub const NO_MODE_NOTICE: &str = "No Guided Mode";

/// Pass/fail as printed on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    pub fn from_stability(stability: &StabilityResult) -> Self {
        if stability.is_stable {
            Verdict::Passed
        } else {
            Verdict::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Passed => "Passed",
            Verdict::Failed => "Failed",
        }
    }
}

/// Derived beam quantities, present only when a mode exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamSummary {
    pub mode: ModeGeometry,
    pub rayleigh_range: f64,
    pub spot_size_mirror1: f64,
    pub spot_size_mirror2: f64,
    pub waist_inside: bool,
    pub envelope: Vec<BeamSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CavityReport {
    pub cavity: Cavity,
    pub stability: StabilityResult,
    pub regime: StabilityRegime,
    pub verdict: Verdict,
    pub beam: Option<BeamSummary>,
    pub generated_at: DateTime<Utc>,
}

/// Analyse a cavity and collect everything the outputs need.
pub fn build_report(cavity: &Cavity, output: &OutputConfig) -> Result<CavityReport> {
    let analysis = analyze(cavity)?;
    let regime = analysis.stability.regime();
    info!(
        product = analysis.stability.product,
        regime = regime.label(),
        "Cavity analysed"
    );

    let beam = match (analysis.mode, analysis.beam_profile()?) {
        (Some(mode), Some(profile)) => {
            let (spot_size_mirror1, spot_size_mirror2) = profile.mirror_spot_sizes(cavity);
            let envelope = profile.sample_cavity(cavity, output.envelope_points)?;
            debug!("Sampled {} envelope points", envelope.len());

            Some(BeamSummary {
                mode,
                rayleigh_range: profile.rayleigh_range(),
                spot_size_mirror1,
                spot_size_mirror2,
                waist_inside: mode.waist_inside(cavity.length()),
                envelope,
            })
        }
        _ => None,
    };

    Ok(CavityReport {
        cavity: analysis.cavity,
        stability: analysis.stability,
        regime,
        verdict: Verdict::from_stability(&analysis.stability),
        beam,
        generated_at: Utc::now(),
    })
}

/// Console summary.
pub fn render_text(report: &CavityReport) -> String {
    let cavity = &report.cavity;
    let stability = &report.stability;

    let mut lines = vec![
        "Analysis Complete.".to_string(),
        format!(
            "Cavity: L = {} m, R1 = {}, R2 = {}, wavelength = {:.1} nm",
            cavity.length(),
            describe_radius(cavity.radius1()),
            describe_radius(cavity.radius2()),
            cavity.wavelength() * 1e9
        ),
        format!("g1 = {:.4}, g2 = {:.4}", stability.g1, stability.g2),
        format!("Stability Condition: {}", report.verdict.as_str()),
        format!("g1*g2 Product: {:.4}", stability.product),
    ];

    match &report.beam {
        Some(beam) => {
            lines.push(format!(
                "Minimum Waist Radius (w0): {:.2} microns",
                beam.mode.waist_radius * 1e6
            ));
            lines.push(format!(
                "Waist Position (z1): {:.4} m from mirror 1{}",
                beam.mode.waist_position,
                if beam.waist_inside { "" } else { " (outside the mirrors)" }
            ));
            lines.push(format!("Rayleigh Range (zR): {:.4} m", beam.rayleigh_range));
            lines.push(format!(
                "Spot Size on Mirrors: {:.2} / {:.2} microns",
                beam.spot_size_mirror1 * 1e6,
                beam.spot_size_mirror2 * 1e6
            ));
        }
        None => {
            let heading = match report.regime {
                StabilityRegime::Boundary => "MARGINALLY STABLE CAVITY (stability boundary)",
                _ => "UNSTABLE CAVITY",
            };
            lines.push(heading.to_string());
            lines.push(NO_MODE_NOTICE.to_string());
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn describe_radius(radius: f64) -> String {
    if Cavity::is_flat_mirror(radius) {
        "flat".to_string()
    } else {
        format!("{} m", radius)
    }
}
