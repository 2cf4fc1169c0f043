//! Distance estimates and step costs on the cell lattice.

use aero_spatial::CellCoord;

/// Euclidean distance between two cells on the unit lattice.
///
/// Differences are taken in `f64`, so coordinates anywhere in the `i32`
/// range are safe.
#[must_use]
pub fn euclidean(a: CellCoord, b: CellCoord) -> f64 {
    let dx = f64::from(b.x) - f64::from(a.x);
    let dy = f64::from(b.y) - f64::from(a.y);
    let dz = f64::from(b.z) - f64::from(a.z);
    dz.mul_add(dz, dx.mul_add(dx, dy * dy)).sqrt()
}

/// Admissible heuristic: straight-line world distance between cell centers.
///
/// Centers share the same half-cell offset on every axis, so the distance
/// between centers is the lattice distance scaled by `cell_size`.
#[must_use]
pub fn heuristic(a: CellCoord, b: CellCoord, cell_size: f64) -> f64 {
    euclidean(a, b) * cell_size
}

/// Exact cost of moving between two adjacent cells.
///
/// For the 26-neighborhood this is one of `cell_size`, `cell_size * sqrt(2)`,
/// or `cell_size * sqrt(3)` depending on whether the step crosses a face,
/// an edge, or a corner.
#[must_use]
pub fn move_cost(a: CellCoord, b: CellCoord, cell_size: f64) -> f64 {
    euclidean(a, b) * cell_size
}
