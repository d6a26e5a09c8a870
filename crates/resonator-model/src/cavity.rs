//! Cavity definition
//!
//! Two mirrors facing each other along the optical axis. Radii are signed:
//! positive for a concave mirror whose center of curvature lies inside the
//! cavity, negative for convex. A flat mirror is a very large radius.

use crate::{ResonatorError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Nd:YAG line, used when no wavelength is given
pub const DEFAULT_WAVELENGTH_M: f64 = 1064e-9;

/// Radius to pass for a flat mirror
pub const FLAT_MIRROR_RADIUS_M: f64 = 1e10;

/// Any |R| at or above this is treated as flat when describing a cavity
pub const FLAT_MIRROR_THRESHOLD_M: f64 = 1e9;

/// Immutable resonator geometry (all lengths in meters).
///
/// Only [`Cavity::new`] builds one, so a `Cavity` in hand always has a
/// positive finite length and wavelength and nonzero finite radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCavity")]
pub struct Cavity {
    length: f64,
    radius1: f64,
    radius2: f64,
    wavelength: f64,
}

/// Unvalidated wire form of a [`Cavity`].
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawCavity {
    length: f64,
    radius1: f64,
    radius2: f64,
    #[serde(default = "default_wavelength")]
    wavelength: f64,
}

fn default_wavelength() -> f64 {
    DEFAULT_WAVELENGTH_M
}

impl TryFrom<RawCavity> for Cavity {
    type Error = ResonatorError;

    fn try_from(raw: RawCavity) -> Result<Self> {
        Cavity::new(raw.length, raw.radius1, raw.radius2, raw.wavelength)
    }
}

impl Cavity {
    /// Validate and build a cavity.
    ///
    /// A radius of exactly zero is rejected here rather than left to turn
    /// into an infinite g-parameter later. So is a length/wavelength pair
    /// whose waist scale `L·λ/π` is not a normal `f64`: such a cavity would
    /// classify as stable but its waist would underflow to zero.
    pub fn new(length: f64, radius1: f64, radius2: f64, wavelength: f64) -> Result<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(ResonatorError::InvalidConfiguration(format!(
                "length must be positive and finite, got {}",
                length
            )));
        }
        validate_radius("radius1", radius1)?;
        validate_radius("radius2", radius2)?;
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(ResonatorError::InvalidConfiguration(format!(
                "wavelength must be positive and finite, got {}",
                wavelength
            )));
        }
        let scale = length * wavelength / PI;
        if !scale.is_normal() {
            return Err(ResonatorError::InvalidConfiguration(format!(
                "length {:e} and wavelength {:e} are too small for a representable waist",
                length, wavelength
            )));
        }

        Ok(Self {
            length,
            radius1,
            radius2,
            wavelength,
        })
    }

    /// Cavity at the default 1064 nm wavelength.
    pub fn with_default_wavelength(length: f64, radius1: f64, radius2: f64) -> Result<Self> {
        Self::new(length, radius1, radius2, DEFAULT_WAVELENGTH_M)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn radius1(&self) -> f64 {
        self.radius1
    }

    pub fn radius2(&self) -> f64 {
        self.radius2
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Same mirrors at another wavelength.
    pub fn at_wavelength(&self, wavelength: f64) -> Result<Self> {
        Self::new(self.length, self.radius1, self.radius2, wavelength)
    }

    /// Whether a radius follows the flat-mirror convention.
    pub fn is_flat_mirror(radius: f64) -> bool {
        radius.abs() >= FLAT_MIRROR_THRESHOLD_M
    }
}

fn validate_radius(name: &str, radius: f64) -> Result<()> {
    if radius == 0.0 {
        return Err(ResonatorError::InvalidConfiguration(format!(
            "{} must be nonzero (use {:e} for a flat mirror)",
            name, FLAT_MIRROR_RADIUS_M
        )));
    }
    if !radius.is_finite() {
        return Err(ResonatorError::InvalidConfiguration(format!(
            "{} must be finite (use {:e} for a flat mirror), got {}",
            name, FLAT_MIRROR_RADIUS_M, radius
        )));
    }
    Ok(())
}
