//! Fundamental-mode geometry
//!
//! Waist radius and waist location of the TEM00 mode for a stable,
//! non-degenerate two-mirror resonator:
//!
//! ```text
//! D  = g1 + g2 - 2·g1·g2
//! w0 = √( (L·λ/π) · √(g1·g2·(1 - g1·g2)) / |D| )
//! z1 = L·g2·(1 - g1) / D
//! ```
//!
//! For `0 < g1·g2 < 1`, `D` has no real zero, so it only vanishes on the
//! stability boundary, which is excluded before the formulas run.

use crate::{Cavity, ResonatorError, Result, StabilityResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// How far below zero a radicand may sit before it is treated as a
/// contract violation instead of round-off.
pub const RADICAND_TOLERANCE: f64 = -1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeGeometry {
    /// w0, meters, always > 0
    pub waist_radius: f64,
    /// z1, meters from mirror 1. May be negative or beyond L for
    /// asymmetric cavities.
    pub waist_position: f64,
}

impl ModeGeometry {
    /// Whether the waist sits between the mirrors.
    pub fn waist_inside(&self, length: f64) -> bool {
        (0.0..=length).contains(&self.waist_position)
    }

    /// Waist distance from mirror 2.
    pub fn distance_from_mirror2(&self, length: f64) -> f64 {
        length - self.waist_position
    }
}

/// Waist radius and position, or `None` when the cavity has no
/// well-defined single-waist mode.
///
/// `None` covers unstable cavities and the two boundary products (exactly 0
/// or 1). An `Err` means `stability` claims stable but the formulas
/// disagree, which only happens if the result did not come from
/// [`analyze_stability`](crate::analyze_stability).
pub fn compute_mode_geometry(
    cavity: &Cavity,
    stability: &StabilityResult,
) -> Result<Option<ModeGeometry>> {
    if !stability.is_stable {
        debug!(product = stability.product, "no guided mode: unstable");
        return Ok(None);
    }
    if stability.is_boundary() {
        debug!(product = stability.product, "no guided mode: stability boundary");
        return Ok(None);
    }

    let StabilityResult { g1, g2, .. } = *stability;
    let length = cavity.length();
    let product = g1 * g2;

    let denominator = g1 + g2 - 2.0 * product;
    if denominator == 0.0 || !denominator.is_finite() {
        warn!(g1, g2, denominator, "mode denominator vanished inside stable region");
        return Err(ResonatorError::NumericInconsistency {
            quantity: "mode denominator",
            value: denominator,
        });
    }

    let confinement = clamp_radicand("confinement radicand", product * (1.0 - product))?;
    let waist_sq = clamp_radicand(
        "waist radicand",
        (length * cavity.wavelength() / PI) * confinement.sqrt() / denominator.abs(),
    )?;

    let waist_radius = waist_sq.sqrt();
    if !(waist_radius.is_finite() && waist_radius > 0.0) {
        warn!(g1, g2, waist_radius, "degenerate waist inside stable region");
        return Err(ResonatorError::NumericInconsistency {
            quantity: "waist radius",
            value: waist_radius,
        });
    }

    let waist_position = length * g2 * (1.0 - g1) / denominator;
    debug!(waist_radius, waist_position, "mode geometry");

    Ok(Some(ModeGeometry {
        waist_radius,
        waist_position,
    }))
}

/// Clamp round-off below zero, reject anything more negative.
fn clamp_radicand(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_nan() || value < RADICAND_TOLERANCE {
        warn!(quantity, value, "negative radicand");
        return Err(ResonatorError::NumericInconsistency { quantity, value });
    }
    Ok(value.max(0.0))
}
