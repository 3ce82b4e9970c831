use thiserror::Error;

use crate::viewport::Axis;

/// Errors originating from the core module.
///
/// Raised once, before a pass starts. The escape-time kernel itself
/// has no failure mode.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// A zero or negative step would never advance the scan.
    #[error("Pas dégénéré sur l'axe {axis} : {step}")]
    DegenerateStep {
        /// Axis of the offending step.
        axis: Axis,
        /// Step value.
        step: i64,
    },

    /// Lower bound lies above the upper bound.
    #[error("Viewport inversé sur l'axe {axis} : {min} > {max}")]
    InvertedViewport {
        /// Axis of the offending bounds.
        axis: Axis,
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },

    /// Glyph `32 + maxiter` would leave printable ASCII.
    #[error("maxiter hors limites : {max_iter} (max {limit})")]
    MaxIterOutOfRange {
        /// Requested iteration cap.
        max_iter: u32,
        /// Highest accepted cap.
        limit: u32,
    },

    /// Coordinate too large for overflow-free fixed-point products.
    #[error("Coordonnée hors limites : {value}")]
    CoordinateOutOfRange {
        /// Offending coordinate.
        value: i64,
    },

    /// Fewer than two samples requested on an axis.
    #[error("Résolution invalide sur l'axe {axis} : {value}")]
    InvalidResolution {
        /// Axis of the resolution.
        axis: Axis,
        /// Requested sample count.
        value: u32,
    },
}
