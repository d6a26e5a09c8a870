//! Resonator Report
//!
//! Presentation layer over `resonator-model`: turns a cavity analysis into a
//! console summary, a JSON report, a beam-envelope series and a
//! stability-chart grid. Nothing here does physics; every number comes from
//! the four model operations.
//!
//! # Outputs
//!
//! | Output | Content |
//! |--------|---------|
//! | text | verdict, g1·g2, waist radius (µm), waist position |
//! | JSON | full [`CavityReport`] |
//! | envelope CSV | `z_m,radius_m` over `[0, L]` |
//! | chart JSON | [`StabilityChart`](export::StabilityChart): g-plane grid + design point |

use thiserror::Error;

pub mod config;
pub mod export;
pub mod report;

pub use config::{JobConfig, OutputConfig};
pub use report::{build_report, render_text, CavityReport, Verdict};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Model(#[from] resonator_model::ResonatorError),
    #[error("Missing cavity parameter: {0}")]
    MissingParameter(&'static str),
}

pub type Result<T> = std::result::Result<T, ReportError>;
