//! The traversability voxel grid.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::coord::CellCoord;
use crate::error::SpatialError;

/// Axis-aligned bounds in cell (lattice) space. Both corners are inclusive.
///
/// # Example
///
/// ```
/// use aero_spatial::{CellCoord, GridBounds};
///
/// let bounds = GridBounds::new(CellCoord::new(0, 0, 0), CellCoord::new(2, 2, 2));
/// assert!(bounds.contains(CellCoord::new(1, 2, 0)));
/// assert_eq!(bounds.volume(), 27);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    /// Minimum corner (inclusive).
    pub min: CellCoord,
    /// Maximum corner (inclusive).
    pub max: CellCoord,
}

impl GridBounds {
    /// Creates bounds from two corners, reordering so min ≤ max per axis.
    #[must_use]
    pub fn new(a: CellCoord, b: CellCoord) -> Self {
        Self {
            min: CellCoord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: CellCoord::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates bounds covering a single cell.
    #[must_use]
    pub const fn from_cell(coord: CellCoord) -> Self {
        Self {
            min: coord,
            max: coord,
        }
    }

    /// Returns the size of the bounds as (width, depth, height) in cells.
    #[must_use]
    pub const fn size(&self) -> (u32, u32, u32) {
        (
            self.max.x.abs_diff(self.min.x).saturating_add(1),
            self.max.y.abs_diff(self.min.y).saturating_add(1),
            self.max.z.abs_diff(self.min.z).saturating_add(1),
        )
    }

    /// Returns the total number of cells covered.
    #[must_use]
    pub fn volume(&self) -> u64 {
        let (w, d, h) = self.size();
        u64::from(w)
            .saturating_mul(u64::from(d))
            .saturating_mul(u64::from(h))
    }

    /// Checks whether a cell lies inside the bounds.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
            && coord.z >= self.min.z
            && coord.z <= self.max.z
    }

    /// Checks whether two bounds share at least one cell.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Expands the bounds to include a cell.
    pub fn expand_to_include(&mut self, coord: CellCoord) {
        self.min = CellCoord::new(
            self.min.x.min(coord.x),
            self.min.y.min(coord.y),
            self.min.z.min(coord.z),
        );
        self.max = CellCoord::new(
            self.max.x.max(coord.x),
            self.max.y.max(coord.y),
            self.max.z.max(coord.z),
        );
    }

    /// Iterates every cell in the bounds, X varying fastest.
    #[must_use]
    pub const fn iter(&self) -> GridBoundsIter {
        GridBoundsIter {
            bounds: *self,
            current: Some(self.min),
        }
    }
}

impl IntoIterator for GridBounds {
    type Item = CellCoord;
    type IntoIter = GridBoundsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over every cell in a [`GridBounds`].
#[derive(Debug, Clone)]
pub struct GridBoundsIter {
    bounds: GridBounds,
    current: Option<CellCoord>,
}

impl Iterator for GridBoundsIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        let mut next = current;
        next.x += 1;
        if next.x > self.bounds.max.x {
            next.x = self.bounds.min.x;
            next.y += 1;
            if next.y > self.bounds.max.y {
                next.y = self.bounds.min.y;
                next.z += 1;
                if next.z > self.bounds.max.z {
                    self.current = None;
                    return Some(current);
                }
            }
        }
        self.current = Some(next);

        Some(current)
    }
}

/// The navigation voxel grid: a sparse mapping from cell coordinate to a
/// traversability flag, at a fixed positive cell size.
///
/// The lattice is anchored at the world origin, so every cell's canonical
/// center is `index * cell_size + cell_size / 2` per axis. The grid is
/// rebuilt wholesale when bounds or cell size change, and mutated in place
/// (walkable flag only) when obstruction regions toggle.
///
/// # Example
///
/// ```
/// use aero_spatial::{CellCoord, NavGrid};
/// use nalgebra::Point3;
///
/// let mut grid = NavGrid::try_new(1.0).unwrap();
/// grid.insert_cell(CellCoord::new(0, 0, 0), true);
/// grid.insert_cell(CellCoord::new(1, 0, 0), false);
///
/// assert!(grid.is_walkable(CellCoord::new(0, 0, 0)));
/// assert!(!grid.is_walkable(CellCoord::new(1, 0, 0)));
/// // Absent cells are not walkable either.
/// assert!(!grid.is_walkable(CellCoord::new(9, 9, 9)));
/// ```
#[derive(Debug, Clone)]
pub struct NavGrid {
    /// Edge length of each cubic cell in world units.
    cell_size: f64,
    /// Cached reciprocal for world-to-cell conversion.
    inv_cell_size: f64,
    /// Sparse traversability storage.
    cells: HashMap<CellCoord, bool>,
}

impl NavGrid {
    /// Creates an empty grid, rejecting a non-positive or non-finite cell
    /// size.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidCellSize`] if `cell_size` is zero,
    /// negative, NaN, or infinite.
    pub fn try_new(cell_size: f64) -> Result<Self, SpatialError> {
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return Err(SpatialError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        })
    }

    /// Returns the cell size in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns the number of cells in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the grid holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Maps a world position to the cell containing it.
    ///
    /// # Example
    ///
    /// ```
    /// use aero_spatial::{CellCoord, NavGrid};
    /// use nalgebra::Point3;
    ///
    /// let grid = NavGrid::try_new(100.0).unwrap();
    /// assert_eq!(grid.world_to_cell(Point3::new(250.0, 50.0, -20.0)), CellCoord::new(2, 0, -1));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn world_to_cell(&self, point: Point3<f64>) -> CellCoord {
        CellCoord::new(
            (point.x * self.inv_cell_size).floor() as i32,
            (point.y * self.inv_cell_size).floor() as i32,
            (point.z * self.inv_cell_size).floor() as i32,
        )
    }

    /// Maps a world position to its containing cell, returning `None` when
    /// the lattice index does not fit the `i32` coordinate range.
    ///
    /// Finite world positions far from the origin (or tiny cell sizes) can
    /// produce indices beyond `i32`; [`NavGrid::world_to_cell`] would
    /// saturate those, silently aliasing distinct positions.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn world_to_cell_checked(&self, point: Point3<f64>) -> Option<CellCoord> {
        let index = |axis: f64| {
            let idx = (axis * self.inv_cell_size).floor();
            (f64::from(i32::MIN)..=f64::from(i32::MAX))
                .contains(&idx)
                .then_some(idx as i32)
        };
        Some(CellCoord::new(
            index(point.x)?,
            index(point.y)?,
            index(point.z)?,
        ))
    }

    /// Returns the canonical world-space center of a cell.
    ///
    /// The center is always `index * cell_size + cell_size / 2` per axis,
    /// which keeps center coordinates exact for equal cells.
    #[must_use]
    pub fn cell_center(&self, coord: CellCoord) -> Point3<f64> {
        let half = self.cell_size * 0.5;
        Point3::new(
            f64::from(coord.x).mul_add(self.cell_size, half),
            f64::from(coord.y).mul_add(self.cell_size, half),
            f64::from(coord.z).mul_add(self.cell_size, half),
        )
    }

    /// Inserts a cell with the given traversability, replacing any previous
    /// flag.
    pub fn insert_cell(&mut self, coord: CellCoord, walkable: bool) -> Option<bool> {
        self.cells.insert(coord, walkable)
    }

    /// Returns the traversability flag of a cell, or `None` if the cell is
    /// not part of the grid.
    #[must_use]
    pub fn get(&self, coord: CellCoord) -> Option<bool> {
        self.cells.get(&coord).copied()
    }

    /// Returns `true` if the cell exists and is traversable.
    #[must_use]
    pub fn is_walkable(&self, coord: CellCoord) -> bool {
        self.get(coord) == Some(true)
    }

    /// Returns `true` if the cell is part of the grid.
    #[must_use]
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Updates the traversability flag of an existing cell.
    ///
    /// Returns `false` (and changes nothing) if the cell is not part of the
    /// grid; obstruction regions may extend past the built volume.
    pub fn set_walkable(&mut self, coord: CellCoord, walkable: bool) -> bool {
        match self.cells.get_mut(&coord) {
            Some(flag) => {
                *flag = walkable;
                true
            }
            None => false,
        }
    }

    /// Iterates all cells and their traversability flags.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, bool)> + '_ {
        self.cells.iter().map(|(coord, walkable)| (*coord, *walkable))
    }

    /// Iterates all cell coordinates.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.keys().copied()
    }

    /// Computes the bounding box of all cells, or `None` for an empty grid.
    #[must_use]
    pub fn bounds(&self) -> Option<GridBounds> {
        let mut iter = self.cells.keys();
        let first = *iter.next()?;

        let mut bounds = GridBounds::from_cell(first);
        for coord in iter {
            bounds.expand_to_include(*coord);
        }

        Some(bounds)
    }
}
