//! The navigation error type.

use aero_spatial::SpatialError;
use nalgebra::Point3;

/// Errors produced while building grids or searching for paths.
///
/// Note that an unreachable goal is not an error: searches that exhaust the
/// frontier return an empty [`FlightPath`](crate::FlightPath).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NavError {
    /// The cell size must be positive and finite.
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),

    /// Grid bounds must have positive extent on every axis.
    #[error("malformed grid bounds: min {min} must be strictly below max {max} on every axis")]
    MalformedBounds {
        /// Requested minimum corner.
        min: Point3<f64>,
        /// Requested maximum corner.
        max: Point3<f64>,
    },

    /// A search was requested against a grid with no cells.
    #[error("navigation grid is empty, build it before searching")]
    EmptyGrid,

    /// A world coordinate was NaN or infinite.
    #[error("coordinate is not finite: {0}")]
    NonFiniteCoordinate(Point3<f64>),

    /// A world coordinate maps to a lattice index outside the representable
    /// cell range.
    #[error("coordinate outside the representable cell range: {0}")]
    OutOfRangeCoordinate(Point3<f64>),

    /// An obstruction toggle referenced a region id that was never
    /// registered.
    #[error("unknown obstruction region id {0}")]
    UnknownRegion(usize),

    /// A spatial-layer failure.
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}
