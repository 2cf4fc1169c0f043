//! Grid construction from a world volume and a traversability oracle.

use aero_spatial::{CellCoord, NavGrid};
use aero_types::NavError;
use nalgebra::Point3;
use tracing::debug;

use crate::oracle::TraversalOracle;

/// Builds a navigation grid covering the world volume between `min` and
/// `max`, sampling the oracle once per cell at its canonical center.
///
/// The lattice is anchored at the world origin, not at `min`: only cells
/// that fit entirely inside the volume are produced, so re-building with
/// shifted bounds yields cells whose centers coincide exactly where the
/// volumes overlap.
///
/// # Errors
///
/// Returns [`NavError::InvalidCellSize`] for a non-positive or non-finite
/// cell size, [`NavError::NonFiniteCoordinate`] for NaN or infinite corners,
/// and [`NavError::MalformedBounds`] unless `min` is strictly below `max`
/// on every axis.
///
/// # Example
///
/// ```
/// use aero_nav::{build_grid, OpenSpace};
/// use nalgebra::Point3;
///
/// let grid = build_grid(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(300.0, 300.0, 300.0),
///     100.0,
///     &OpenSpace,
/// )
/// .unwrap();
/// assert_eq!(grid.len(), 27);
/// ```
pub fn build_grid<O: TraversalOracle>(
    min: Point3<f64>,
    max: Point3<f64>,
    cell_size: f64,
    oracle: &O,
) -> Result<NavGrid, NavError> {
    if cell_size <= 0.0 || !cell_size.is_finite() {
        return Err(NavError::InvalidCellSize(cell_size));
    }
    for point in [min, max] {
        if !point.iter().all(|axis| axis.is_finite()) {
            return Err(NavError::NonFiniteCoordinate(point));
        }
    }
    if min.x >= max.x || min.y >= max.y || min.z >= max.z {
        return Err(NavError::MalformedBounds { min, max });
    }

    let mut grid = NavGrid::try_new(cell_size)?;

    let (x_lo, x_hi) = contained_index_range(min.x, max.x, cell_size);
    let (y_lo, y_hi) = contained_index_range(min.y, max.y, cell_size);
    let (z_lo, z_hi) = contained_index_range(min.z, max.z, cell_size);

    let mut clear = 0usize;
    for ix in x_lo..x_hi {
        for iy in y_lo..y_hi {
            for iz in z_lo..z_hi {
                let coord = CellCoord::new(ix, iy, iz);
                let walkable = oracle.is_traversable(grid.cell_center(coord), cell_size);
                clear += usize::from(walkable);
                grid.insert_cell(coord, walkable);
            }
        }
    }

    debug!(
        cells = grid.len(),
        clear,
        cell_size,
        "navigation grid built"
    );
    Ok(grid)
}

/// Half-open lattice index range `[lo, hi)` of cells lying entirely within
/// `[min, max]` on one axis.
#[allow(clippy::cast_possible_truncation)]
fn contained_index_range(min: f64, max: f64, cell_size: f64) -> (i32, i32) {
    let lo = (min / cell_size).ceil() as i32;
    let hi = (max / cell_size).floor() as i32;
    (lo, hi.max(lo))
}
