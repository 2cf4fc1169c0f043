//! Flight path representation.

use aero_spatial::CellCoord;
use nalgebra::Point3;

/// An ordered flight path through the navigation grid.
///
/// A path carries both the grid cells it traverses and the world-space
/// waypoints at their canonical centers. An empty path means no route was
/// found; path membership checks compare integer cell coordinates, so they
/// are exact.
///
/// # Example
///
/// ```
/// use aero_spatial::CellCoord;
/// use aero_types::FlightPath;
///
/// let path = FlightPath::from_cells(
///     vec![CellCoord::new(0, 0, 0), CellCoord::new(1, 0, 0)],
///     100.0,
/// );
/// assert_eq!(path.len(), 2);
/// assert!(path.contains_cell(CellCoord::new(1, 0, 0)));
/// assert_eq!(path.length(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlightPath {
    cells: Vec<CellCoord>,
    waypoints: Vec<Point3<f64>>,
    length: f64,
}

impl FlightPath {
    /// The empty path, reported when no route exists.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: Vec::new(),
            waypoints: Vec::new(),
            length: 0.0,
        }
    }

    /// Builds a path from an ordered cell sequence, deriving waypoints at
    /// the canonical cell centers and the total length along them.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>, cell_size: f64) -> Self {
        let half = cell_size * 0.5;
        let waypoints: Vec<Point3<f64>> = cells
            .iter()
            .map(|cell| {
                Point3::new(
                    f64::from(cell.x).mul_add(cell_size, half),
                    f64::from(cell.y).mul_add(cell_size, half),
                    f64::from(cell.z).mul_add(cell_size, half),
                )
            })
            .collect();

        let length = waypoints
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
            .sum();

        Self {
            cells,
            waypoints,
            length,
        }
    }

    /// Returns the number of cells in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` for the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the traversed cells in order, start first.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Returns the world-space waypoints in order, start first.
    #[must_use]
    pub fn waypoints(&self) -> &[Point3<f64>] {
        &self.waypoints
    }

    /// Returns the total world-space length along the waypoints.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Checks whether the path passes through a cell.
    #[must_use]
    pub fn contains_cell(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_path() {
        let path = FlightPath::empty();
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.length(), 0.0);
        assert!(!path.contains_cell(CellCoord::origin()));
    }

    #[test]
    fn test_waypoints_at_cell_centers() {
        let path = FlightPath::from_cells(vec![CellCoord::new(2, 0, -1)], 100.0);
        assert_eq!(path.waypoints(), &[Point3::new(250.0, 50.0, -50.0)]);
    }

    #[test]
    fn test_length_straight_and_diagonal() {
        let straight = FlightPath::from_cells(
            vec![
                CellCoord::new(0, 0, 0),
                CellCoord::new(1, 0, 0),
                CellCoord::new(2, 0, 0),
            ],
            10.0,
        );
        assert_relative_eq!(straight.length(), 20.0, epsilon = 1e-10);

        let diagonal = FlightPath::from_cells(
            vec![CellCoord::new(0, 0, 0), CellCoord::new(1, 1, 1)],
            10.0,
        );
        assert_relative_eq!(diagonal.length(), 10.0 * 3.0_f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_contains_cell_exact() {
        let path = FlightPath::from_cells(
            vec![CellCoord::new(0, 0, 0), CellCoord::new(0, 1, 0)],
            1.0,
        );
        assert!(path.contains_cell(CellCoord::new(0, 1, 0)));
        assert!(!path.contains_cell(CellCoord::new(1, 0, 0)));
    }
}
