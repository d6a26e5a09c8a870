//! g-parameters and the resonator stability criterion
//!
//! A two-mirror resonator confines a paraxial mode iff `0 ≤ g1·g2 ≤ 1`
//! with `g_i = 1 - L/R_i`. Both boundaries count as stable.

use crate::Cavity;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Compute `(g1, g2)` for a cavity.
///
/// `Cavity::new` rejects zero and non-finite radii, so the result is always
/// finite. A flat mirror (R = 1e10) gives g = 1 - L·1e-10, i.e. 1 within
/// round-off.
pub fn compute_g_parameters(cavity: &Cavity) -> (f64, f64) {
    let g1 = 1.0 - cavity.length() / cavity.radius1();
    let g2 = 1.0 - cavity.length() / cavity.radius2();
    debug!(g1, g2, "g-parameters");
    (g1, g2)
}

/// Classify a pair of g-parameters.
pub fn analyze_stability(g1: f64, g2: f64) -> StabilityResult {
    let product = g1 * g2;
    let is_stable = (0.0..=1.0).contains(&product);
    debug!(product, is_stable, "stability");

    StabilityResult {
        g1,
        g2,
        product,
        is_stable,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityResult {
    pub g1: f64,
    pub g2: f64,
    /// g1·g2
    pub product: f64,
    pub is_stable: bool,
}

/// Where a design point sits relative to the stability region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilityRegime {
    /// 0 < g1·g2 < 1
    Stable,
    /// g1·g2 exactly 0 or 1: stable, but no single-waist geometry
    Boundary,
    Unstable,
}

impl StabilityResult {
    pub fn regime(&self) -> StabilityRegime {
        if !self.is_stable {
            StabilityRegime::Unstable
        } else if self.is_boundary() {
            StabilityRegime::Boundary
        } else {
            StabilityRegime::Stable
        }
    }

    /// Product sits exactly on either edge of the stable interval.
    pub fn is_boundary(&self) -> bool {
        self.product == 0.0 || self.product == 1.0
    }
}

impl StabilityRegime {
    pub fn label(&self) -> &'static str {
        match self {
            StabilityRegime::Stable => "stable",
            StabilityRegime::Boundary => "boundary",
            StabilityRegime::Unstable => "unstable",
        }
    }

    /// Whether a fundamental mode with a well-defined waist exists.
    pub fn supports_mode(&self) -> bool {
        matches!(self, StabilityRegime::Stable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_WAVELENGTH_M, FLAT_MIRROR_RADIUS_M};

    fn cavity(l: f64, r1: f64, r2: f64) -> Cavity {
        Cavity::new(l, r1, r2, DEFAULT_WAVELENGTH_M).unwrap()
    }

    #[test]
    fn test_symmetric_reference_design() {
        let (g1, g2) = compute_g_parameters(&cavity(0.5, 0.8, 0.8));
        assert!((g1 - 0.375).abs() < 1e-12);
        assert!((g2 - 0.375).abs() < 1e-12);

        let result = analyze_stability(g1, g2);
        assert!((result.product - 0.140625).abs() < 1e-12);
        assert!(result.is_stable);
        assert_eq!(result.regime(), StabilityRegime::Stable);
    }

    #[test]
    fn test_unstable_concentric_overshoot() {
        let (g1, g2) = compute_g_parameters(&cavity(2.0, 0.5, 0.5));
        assert_eq!(g1, -3.0);
        assert_eq!(g2, -3.0);

        let result = analyze_stability(g1, g2);
        assert_eq!(result.product, 9.0);
        assert!(!result.is_stable);
        assert_eq!(result.regime(), StabilityRegime::Unstable);
        assert!(!result.regime().supports_mode());
    }

    #[test]
    fn test_flat_mirror_g_is_unity() {
        let (g1, g2) = compute_g_parameters(&cavity(1.0, FLAT_MIRROR_RADIUS_M, 2.0));
        assert!(g1.is_finite());
        assert!((g1 - 1.0).abs() < 1e-9);
        assert!((g2 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_boundaries_are_stable() {
        let zero = analyze_stability(0.0, 0.7);
        assert!(zero.is_stable);
        assert_eq!(zero.regime(), StabilityRegime::Boundary);

        let one = analyze_stability(-1.0, -1.0);
        assert!(one.is_stable);
        assert_eq!(one.regime(), StabilityRegime::Boundary);
    }

    #[test]
    fn test_negative_product_unstable() {
        let result = analyze_stability(0.5, -0.5);
        assert!(!result.is_stable);
        assert_eq!(result.product, -0.25);
    }

    #[test]
    fn test_half_confocal_boundary() {
        let (g1, g2) = compute_g_parameters(&cavity(1.0, 1.0, 1e10));
        assert_eq!(g1, 0.0);
        let result = analyze_stability(g1, g2);
        assert_eq!(result.product, 0.0);
        assert!(result.is_stable);
        assert!(result.is_boundary());
    }

    #[test]
    fn test_regime_labels() {
        assert_eq!(StabilityRegime::Stable.label(), "stable");
        assert_eq!(StabilityRegime::Boundary.label(), "boundary");
        assert_eq!(StabilityRegime::Unstable.label(), "unstable");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        // Classification matches the closed interval
        #[test]
        fn fuzz_stability_closed_interval(g1 in -5.0f64..5.0, g2 in -5.0f64..5.0) {
            let result = analyze_stability(g1, g2);
            prop_assert_eq!(result.product, g1 * g2);
            prop_assert_eq!(result.is_stable, g1 * g2 >= 0.0 && g1 * g2 <= 1.0);
        }

        // Stability is symmetric under swapping the mirrors
        #[test]
        fn fuzz_mirror_swap_symmetry(
            length in 0.01f64..5.0,
            r1 in prop_oneof![-10.0f64..-0.01, 0.01f64..10.0],
            r2 in prop_oneof![-10.0f64..-0.01, 0.01f64..10.0],
        ) {
            let a = Cavity::with_default_wavelength(length, r1, r2).unwrap();
            let b = Cavity::with_default_wavelength(length, r2, r1).unwrap();
            let (a1, a2) = compute_g_parameters(&a);
            let (b1, b2) = compute_g_parameters(&b);
            prop_assert_eq!(
                analyze_stability(a1, a2).is_stable,
                analyze_stability(b1, b2).is_stable
            );
        }
    }
}
