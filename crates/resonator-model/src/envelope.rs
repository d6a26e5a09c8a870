//! Gaussian beam envelope
//!
//! Beam radius along the axis for a given waist:
//! `w(z) = w0 · √(1 + ((z - z1)/zR)²)` with Rayleigh range `zR = π·w0²/λ`.

use crate::{linspace, Cavity, ModeGeometry, ResonatorError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Rayleigh range `π·w0²/λ` in meters.
pub fn rayleigh_range(waist_radius: f64, wavelength: f64) -> f64 {
    PI * waist_radius * waist_radius / wavelength
}

/// Beam radius at axial coordinate `z` (meters from mirror 1).
///
/// Defined for every real `z` as long as `waist_radius > 0` and
/// `wavelength > 0`. At `z == waist_position` it returns `waist_radius`
/// exactly.
pub fn beam_radius_at(z: f64, waist_radius: f64, waist_position: f64, wavelength: f64) -> f64 {
    let z_r = rayleigh_range(waist_radius, wavelength);
    let x = (z - waist_position) / z_r;
    waist_radius * (1.0 + x * x).sqrt()
}

/// One point of a sampled envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSample {
    pub z: f64,
    pub radius: f64,
}

/// Envelope parameters for on-demand evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamProfile {
    pub waist_radius: f64,
    pub waist_position: f64,
    pub wavelength: f64,
}

impl BeamProfile {
    pub fn new(waist_radius: f64, waist_position: f64, wavelength: f64) -> Result<Self> {
        if !(waist_radius.is_finite() && waist_radius > 0.0) {
            return Err(ResonatorError::InvalidBeam(format!(
                "waist radius must be positive and finite, got {}",
                waist_radius
            )));
        }
        if !waist_position.is_finite() {
            return Err(ResonatorError::InvalidBeam(format!(
                "waist position must be finite, got {}",
                waist_position
            )));
        }
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(ResonatorError::InvalidBeam(format!(
                "wavelength must be positive and finite, got {}",
                wavelength
            )));
        }

        Ok(Self {
            waist_radius,
            waist_position,
            wavelength,
        })
    }

    pub fn for_cavity(cavity: &Cavity, mode: &ModeGeometry) -> Result<Self> {
        Self::new(mode.waist_radius, mode.waist_position, cavity.wavelength())
    }

    pub fn rayleigh_range(&self) -> f64 {
        rayleigh_range(self.waist_radius, self.wavelength)
    }

    pub fn radius_at(&self, z: f64) -> f64 {
        beam_radius_at(z, self.waist_radius, self.waist_position, self.wavelength)
    }

    /// Evenly spaced samples over `[z_start, z_end]`, both ends included.
    pub fn sample(&self, z_start: f64, z_end: f64, points: usize) -> Result<Vec<BeamSample>> {
        Ok(linspace(z_start, z_end, points)?
            .into_iter()
            .map(|z| BeamSample {
                z,
                radius: self.radius_at(z),
            })
            .collect())
    }

    /// Samples between the two mirrors.
    pub fn sample_cavity(&self, cavity: &Cavity, points: usize) -> Result<Vec<BeamSample>> {
        self.sample(0.0, cavity.length(), points)
    }

    /// Beam radius on mirror 1 and mirror 2.
    pub fn mirror_spot_sizes(&self, cavity: &Cavity) -> (f64, f64) {
        (self.radius_at(0.0), self.radius_at(cavity.length()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_WAVELENGTH_M;

    #[test]
    fn test_radius_at_waist_is_exact() {
        let w0 = 3.5438e-4;
        let z1 = 0.25;
        assert_eq!(beam_radius_at(z1, w0, z1, DEFAULT_WAVELENGTH_M), w0);
    }

    #[test]
    fn test_radius_at_rayleigh_range() {
        let profile = BeamProfile::new(1e-3, 0.1, DEFAULT_WAVELENGTH_M).unwrap();
        let z_r = profile.rayleigh_range();
        let w = profile.radius_at(0.1 + z_r);
        assert!((w / profile.waist_radius - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_envelope_symmetric_about_waist() {
        let profile = BeamProfile::new(2e-4, 0.3, DEFAULT_WAVELENGTH_M).unwrap();
        let before = profile.radius_at(0.3 - 0.17);
        let after = profile.radius_at(0.3 + 0.17);
        assert!((before - after).abs() < 1e-15);
    }

    #[test]
    fn test_sample_cavity() {
        let cavity = Cavity::new(0.5, 0.8, 0.8, DEFAULT_WAVELENGTH_M).unwrap();
        let profile = BeamProfile::new(3.5e-4, 0.25, DEFAULT_WAVELENGTH_M).unwrap();
        let samples = profile.sample_cavity(&cavity, 100).unwrap();

        assert_eq!(samples.len(), 100);
        assert_eq!(samples[0].z, 0.0);
        assert_eq!(samples[99].z, 0.5);
        assert!(samples.iter().all(|s| s.radius >= profile.waist_radius));

        // Restartable: a second pass gives the same series
        assert_eq!(samples, profile.sample_cavity(&cavity, 100).unwrap());
    }

    #[test]
    fn test_mirror_spot_sizes_symmetric() {
        let cavity = Cavity::new(0.5, 0.8, 0.8, DEFAULT_WAVELENGTH_M).unwrap();
        let profile = BeamProfile::new(3.5e-4, 0.25, DEFAULT_WAVELENGTH_M).unwrap();
        let (w1, w2) = profile.mirror_spot_sizes(&cavity);
        assert!((w1 - w2).abs() < 1e-15);
        assert!(w1 > profile.waist_radius);
    }

    #[test]
    fn test_invalid_profile() {
        assert!(matches!(
            BeamProfile::new(0.0, 0.0, DEFAULT_WAVELENGTH_M),
            Err(ResonatorError::InvalidBeam(_))
        ));
        assert!(BeamProfile::new(1e-4, f64::NAN, DEFAULT_WAVELENGTH_M).is_err());
        assert!(BeamProfile::new(1e-4, 0.0, -1.0).is_err());
    }

    #[test]
    fn test_sample_rejects_single_point() {
        let profile = BeamProfile::new(1e-4, 0.0, DEFAULT_WAVELENGTH_M).unwrap();
        assert!(profile.sample(0.0, 1.0, 1).is_err());
    }
}
