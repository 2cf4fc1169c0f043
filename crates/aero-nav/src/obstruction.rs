//! Dynamic obstruction regions and the reverse cell index.
//!
//! Regions are registered once, against a fixed cell size, and the cells
//! each region covers are precomputed. Toggling a region then costs time
//! proportional to its covered cells, not to the grid.

use aero_spatial::{Aabb, CellCoord, NavGrid};
use aero_types::{FlightPath, NavError};
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// A toggleable axis-aligned obstruction volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstructionRegion {
    aabb: Aabb,
}

impl ObstructionRegion {
    /// Creates a region from a world-space box.
    #[must_use]
    pub const fn new(aabb: Aabb) -> Self {
        Self { aabb }
    }

    /// Creates a region from a center and half-extents.
    #[must_use]
    pub fn from_center_extents(center: Point3<f64>, half_extents: Vector3<f64>) -> Self {
        Self::new(Aabb::from_center(center, half_extents))
    }

    /// Returns the region's bounding box.
    #[must_use]
    pub const fn aabb(&self) -> Aabb {
        self.aabb
    }
}

/// Handle to a registered obstruction region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(usize);

impl RegionId {
    /// Returns the underlying index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a region toggle did to the grid and the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Number of grid cells whose walkable flag was written.
    pub cells_changed: usize,
    /// Whether the region's covered cells intersect the supplied path.
    pub path_hit: bool,
}

/// Precomputed mapping from obstruction regions to the grid cells they
/// cover.
///
/// # Example
///
/// ```
/// use aero_nav::{build_grid, ObstructionIndex, ObstructionRegion, OpenSpace};
/// use aero_spatial::Aabb;
/// use nalgebra::Point3;
///
/// let mut grid = build_grid(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(300.0, 300.0, 300.0),
///     100.0,
///     &OpenSpace,
/// )
/// .unwrap();
///
/// let region = ObstructionRegion::new(Aabb::new(
///     Point3::new(100.0, 0.0, 0.0),
///     Point3::new(200.0, 300.0, 300.0),
/// ));
/// let index = ObstructionIndex::register(vec![region], 100.0).unwrap();
/// let id = index.ids().next().unwrap();
///
/// let outcome = index.apply(&mut grid, id, true, None).unwrap();
/// assert_eq!(outcome.cells_changed, 9);
/// ```
#[derive(Debug, Clone)]
pub struct ObstructionIndex {
    cell_size: f64,
    regions: Vec<ObstructionRegion>,
    covered: Vec<Vec<CellCoord>>,
}

impl ObstructionIndex {
    /// Registers a set of regions against a cell size, precomputing the
    /// covered cells of each.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidCellSize`] for a non-positive or
    /// non-finite cell size.
    pub fn register(
        regions: Vec<ObstructionRegion>,
        cell_size: f64,
    ) -> Result<Self, NavError> {
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return Err(NavError::InvalidCellSize(cell_size));
        }

        let covered = regions
            .iter()
            .map(|region| covered_cells(region.aabb(), cell_size))
            .collect();

        Ok(Self {
            cell_size,
            regions,
            covered,
        })
    }

    /// Returns the cell size the index was registered against.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns the number of registered regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if no regions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterates the ids of all registered regions.
    pub fn ids(&self) -> impl Iterator<Item = RegionId> {
        (0..self.regions.len()).map(RegionId)
    }

    /// Returns a registered region.
    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&ObstructionRegion> {
        self.regions.get(id.0)
    }

    /// Returns the cells a region covers.
    #[must_use]
    pub fn covered_cells(&self, id: RegionId) -> Option<&[CellCoord]> {
        self.covered.get(id.0).map(Vec::as_slice)
    }

    /// Toggles a region on the grid: covered cells that exist in the grid
    /// are marked blocked (or walkable again). Cells the grid never built
    /// are skipped, not created.
    ///
    /// If `path` is supplied, the outcome reports whether any covered cell
    /// lies on it. The scan is geometric and direction-agnostic; callers
    /// decide what a hit means for the path's validity.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::UnknownRegion`] for an id that was never
    /// registered with this index.
    pub fn apply(
        &self,
        grid: &mut NavGrid,
        id: RegionId,
        blocked: bool,
        path: Option<&FlightPath>,
    ) -> Result<ToggleOutcome, NavError> {
        let cells = self
            .covered
            .get(id.0)
            .ok_or(NavError::UnknownRegion(id.0))?;

        let mut cells_changed = 0usize;
        let mut path_hit = false;
        for &cell in cells {
            if grid.set_walkable(cell, !blocked) {
                cells_changed += 1;
            }
            if let Some(path) = path {
                path_hit = path_hit || path.contains_cell(cell);
            }
        }

        debug!(
            region = id.0,
            blocked,
            cells_changed,
            path_hit,
            "obstruction toggled"
        );
        Ok(ToggleOutcome {
            cells_changed,
            path_hit,
        })
    }
}

/// Cells whose canonical centers fall inside the box: lattice indices in
/// the half-open range `[floor(min / cs), floor(max / cs))` per axis.
#[allow(clippy::cast_possible_truncation)]
fn covered_cells(aabb: Aabb, cell_size: f64) -> Vec<CellCoord> {
    let idx = |v: f64| (v / cell_size).floor() as i32;

    let (x_lo, x_hi) = (idx(aabb.min.x), idx(aabb.max.x));
    let (y_lo, y_hi) = (idx(aabb.min.y), idx(aabb.max.y));
    let (z_lo, z_hi) = (idx(aabb.min.z), idx(aabb.max.z));

    let mut cells = Vec::new();
    for x in x_lo..x_hi {
        for y in y_lo..y_hi {
            for z in z_lo..z_hi {
                cells.push(CellCoord::new(x, y, z));
            }
        }
    }
    cells
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::builder::build_grid;
    use crate::oracle::OpenSpace;

    fn grid_27() -> NavGrid {
        build_grid(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(300.0, 300.0, 300.0),
            100.0,
            &OpenSpace,
        )
        .unwrap()
    }

    fn slab_region() -> ObstructionRegion {
        // Covers the middle x-layer of the 3x3x3 grid.
        ObstructionRegion::new(Aabb::new(
            Point3::new(100.0, 0.0, 0.0),
            Point3::new(200.0, 300.0, 300.0),
        ))
    }

    #[test]
    fn test_register_rejects_bad_cell_size() {
        assert!(matches!(
            ObstructionIndex::register(vec![slab_region()], -1.0),
            Err(NavError::InvalidCellSize(_))
        ));
    }

    #[test]
    fn test_covered_cells_precomputed() {
        let index = ObstructionIndex::register(vec![slab_region()], 100.0).unwrap();
        let id = index.ids().next().unwrap();

        let cells = index.covered_cells(id).unwrap();
        assert_eq!(cells.len(), 9);
        assert!(cells.iter().all(|cell| cell.x == 1));
    }

    #[test]
    fn test_degenerate_region_covers_nothing() {
        let thin = ObstructionRegion::new(Aabb::new(
            Point3::new(110.0, 0.0, 0.0),
            Point3::new(150.0, 300.0, 300.0),
        ));
        let index = ObstructionIndex::register(vec![thin], 100.0).unwrap();
        let id = index.ids().next().unwrap();
        // The box stays inside one lattice column without reaching a center.
        assert!(index.covered_cells(id).unwrap().is_empty());
    }

    #[test]
    fn test_apply_unknown_region() {
        let mut grid = grid_27();
        let index = ObstructionIndex::register(Vec::new(), 100.0).unwrap();
        let bogus = RegionId(3);
        assert!(matches!(
            index.apply(&mut grid, bogus, true, None),
            Err(NavError::UnknownRegion(3))
        ));
    }

    #[test]
    fn test_block_and_unblock_roundtrip() {
        let mut grid = grid_27();
        let index = ObstructionIndex::register(vec![slab_region()], 100.0).unwrap();
        let id = index.ids().next().unwrap();

        let outcome = index.apply(&mut grid, id, true, None).unwrap();
        assert_eq!(outcome.cells_changed, 9);
        assert!(!grid.is_walkable(CellCoord::new(1, 1, 1)));
        assert!(grid.is_walkable(CellCoord::new(0, 1, 1)));

        let outcome = index.apply(&mut grid, id, false, None).unwrap();
        assert_eq!(outcome.cells_changed, 9);
        assert!(grid.is_walkable(CellCoord::new(1, 1, 1)));
    }

    #[test]
    fn test_apply_idempotent() {
        let mut grid = grid_27();
        let index = ObstructionIndex::register(vec![slab_region()], 100.0).unwrap();
        let id = index.ids().next().unwrap();

        index.apply(&mut grid, id, true, None).unwrap();
        let snapshot: Vec<_> = {
            let mut cells: Vec<_> = grid.iter().collect();
            cells.sort_by_key(|(cell, _)| cell.as_array());
            cells
        };

        index.apply(&mut grid, id, true, None).unwrap();
        let mut again: Vec<_> = grid.iter().collect();
        again.sort_by_key(|(cell, _)| cell.as_array());
        assert_eq!(snapshot, again);
    }

    #[test]
    fn test_region_outside_grid_changes_nothing() {
        let mut grid = grid_27();
        let far = ObstructionRegion::from_center_extents(
            Point3::new(5000.0, 5000.0, 5000.0),
            Vector3::new(150.0, 150.0, 150.0),
        );
        let index = ObstructionIndex::register(vec![far], 100.0).unwrap();
        let id = index.ids().next().unwrap();

        let outcome = index.apply(&mut grid, id, true, None).unwrap();
        assert_eq!(outcome.cells_changed, 0);
        assert!(grid.iter().all(|(_, walkable)| walkable));
    }

    #[test]
    fn test_path_hit_reported() {
        let mut grid = grid_27();
        let index = ObstructionIndex::register(vec![slab_region()], 100.0).unwrap();
        let id = index.ids().next().unwrap();

        let crossing = FlightPath::from_cells(
            vec![
                CellCoord::new(0, 0, 0),
                CellCoord::new(1, 0, 0),
                CellCoord::new(2, 0, 0),
            ],
            100.0,
        );
        let elsewhere = FlightPath::from_cells(vec![CellCoord::new(0, 2, 2)], 100.0);

        let outcome = index.apply(&mut grid, id, true, Some(&crossing)).unwrap();
        assert!(outcome.path_hit);

        let outcome = index.apply(&mut grid, id, false, Some(&elsewhere)).unwrap();
        assert!(!outcome.path_hit);
    }
}
