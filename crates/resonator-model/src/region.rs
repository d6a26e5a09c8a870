//! Stability region sampling
//!
//! Samples the g1–g2 plane on a square grid so a chart can shade the
//! region where `0 ≤ g1·g2 ≤ 1`. The grid is plain numbers; drawing it is
//! left to the caller.

use crate::{linspace, ResonatorError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_G_MIN: f64 = -2.0;
pub const DEFAULT_G_MAX: f64 = 2.0;
pub const DEFAULT_GRID_POINTS: usize = 500;

/// Largest grid side accepted (16.7M cells)
pub const MAX_GRID_POINTS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub g1: f64,
    pub g2: f64,
    pub product: f64,
    pub stable: bool,
}

/// `points × points` samples of the g-plane, row-major with g2 as the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityMap {
    pub g_min: f64,
    pub g_max: f64,
    pub points: usize,
    pub axis: Vec<f64>,
    pub cells: Vec<GridCell>,
}

impl StabilityMap {
    pub fn sample(g_min: f64, g_max: f64, points: usize) -> Result<Self> {
        if !(g_min < g_max) {
            return Err(ResonatorError::InvalidSampling(format!(
                "g range must be increasing, got [{}, {}]",
                g_min, g_max
            )));
        }
        if points > MAX_GRID_POINTS {
            return Err(ResonatorError::InvalidSampling(format!(
                "grid of {} points a side exceeds the limit of {}",
                points, MAX_GRID_POINTS
            )));
        }
        let cell_count = points.checked_mul(points).ok_or_else(|| {
            ResonatorError::InvalidSampling(format!("grid of {} points a side overflows", points))
        })?;
        let axis = linspace(g_min, g_max, points)?;

        let mut cells = Vec::with_capacity(cell_count);
        for &g2 in &axis {
            for &g1 in &axis {
                let product = g1 * g2;
                cells.push(GridCell {
                    g1,
                    g2,
                    product,
                    stable: (0.0..=1.0).contains(&product),
                });
            }
        }

        Ok(Self {
            g_min,
            g_max,
            points,
            axis,
            cells,
        })
    }

    /// Grid used by the standard stability chart: -2..2, 500 points a side.
    pub fn standard() -> Result<Self> {
        Self::sample(DEFAULT_G_MIN, DEFAULT_G_MAX, DEFAULT_GRID_POINTS)
    }

    /// Cell at column `i` (g1) and row `j` (g2).
    pub fn cell(&self, i: usize, j: usize) -> Option<&GridCell> {
        if i >= self.points || j >= self.points {
            return None;
        }
        self.cells.get(j * self.points + i)
    }

    /// Share of the sampled plane that is stable.
    pub fn stable_fraction(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.cells.iter().filter(|c| c.stable).count() as f64 / self.cells.len() as f64
    }

    /// Whether a design point falls inside the sampled window.
    pub fn contains(&self, g1: f64, g2: f64) -> bool {
        let range = self.g_min..=self.g_max;
        range.contains(&g1) && range.contains(&g2)
    }
}
