//! Resonator Model Library
//!
//! Stability regime and fundamental-mode geometry of a two-mirror optical
//! resonator, from mirror separation and radii of curvature.
//!
//! The computation runs strictly downward:
//!
//! ```text
//! Cavity ──► (g1, g2) ──► StabilityResult ──► Option<ModeGeometry> ──► w(z)
//! ```
//!
//! | Step | Function | Formula |
//! |------|----------|---------|
//! | g-parameters | [`compute_g_parameters`] | g_i = 1 - L/R_i |
//! | stability | [`analyze_stability`] | 0 ≤ g1·g2 ≤ 1 |
//! | waist | [`compute_mode_geometry`] | w0, z1 (closed form) |
//! | envelope | [`beam_radius_at`] | w0·√(1 + ((z - z1)/zR)²) |
//!
//! Every function is pure. Nothing here holds state between calls, so any
//! number of threads may call into the crate concurrently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cavity;
pub mod envelope;
pub mod mode;
pub mod region;
pub mod stability;

pub use cavity::{Cavity, DEFAULT_WAVELENGTH_M, FLAT_MIRROR_RADIUS_M, FLAT_MIRROR_THRESHOLD_M};
pub use envelope::{beam_radius_at, rayleigh_range, BeamProfile, BeamSample};
pub use mode::{compute_mode_geometry, ModeGeometry, RADICAND_TOLERANCE};
pub use region::{GridCell, StabilityMap, MAX_GRID_POINTS};
pub use stability::{analyze_stability, compute_g_parameters, StabilityRegime, StabilityResult};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResonatorError {
    #[error("Invalid cavity configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Numeric inconsistency in {quantity}: {value:e}")]
    NumericInconsistency { quantity: &'static str, value: f64 },
    #[error("Invalid sampling request: {0}")]
    InvalidSampling(String),
    #[error("Invalid beam parameters: {0}")]
    InvalidBeam(String),
}

pub type Result<T> = std::result::Result<T, ResonatorError>;

/// Full pass over one cavity: g-parameters, verdict and (if defined) the mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CavityAnalysis {
    pub cavity: Cavity,
    pub stability: StabilityResult,
    pub mode: Option<ModeGeometry>,
}

impl CavityAnalysis {
    /// Beam envelope for the analysed cavity, `None` when no mode exists.
    ///
    /// A `mode` that cannot describe a beam (e.g. a deserialized analysis
    /// with a zero waist) is an error, not `None`.
    pub fn beam_profile(&self) -> Result<Option<BeamProfile>> {
        self.mode
            .as_ref()
            .map(|mode| BeamProfile::for_cavity(&self.cavity, mode))
            .transpose()
    }
}

/// Run the whole chain for a cavity.
pub fn analyze(cavity: &Cavity) -> Result<CavityAnalysis> {
    let (g1, g2) = compute_g_parameters(cavity);
    let stability = analyze_stability(g1, g2);
    let mode = compute_mode_geometry(cavity, &stability)?;

    Ok(CavityAnalysis {
        cavity: *cavity,
        stability,
        mode,
    })
}

/// `points` evenly spaced values over `[start, end]`, both ends included.
pub(crate) fn linspace(start: f64, end: f64, points: usize) -> Result<Vec<f64>> {
    if points < 2 {
        return Err(ResonatorError::InvalidSampling(format!(
            "need at least 2 points, got {}",
            points
        )));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(ResonatorError::InvalidSampling(format!(
            "range must be finite: [{}, {}]",
            start, end
        )));
    }

    let step = (end - start) / (points - 1) as f64;
    Ok((0..points)
        .map(|i| {
            // Pin the last sample so rounding never overshoots the range.
            if i == points - 1 {
                end
            } else {
                start + step * i as f64
            }
        })
        .collect())
}
