//! Discrete cell coordinates.

use nalgebra::Point3;

/// A discrete 3D coordinate identifying one cell of the navigation lattice.
///
/// Coordinates are signed so the lattice extends in every direction from the
/// world origin. Two world positions map to the same `CellCoord` exactly when
/// they fall inside the same cell, which makes cell lookup an exact integer
/// comparison rather than a float tolerance check.
///
/// # Example
///
/// ```
/// use aero_spatial::CellCoord;
///
/// let cell = CellCoord::new(1, -2, 3);
/// assert_eq!(cell.x, 1);
/// assert_eq!(cell.y, -2);
/// assert_eq!(cell.z, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// X lattice index.
    pub x: i32,
    /// Y lattice index.
    pub y: i32,
    /// Z lattice index.
    pub z: i32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell at the lattice origin.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the coordinate as an array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts the lattice index to a floating-point point (unit lattice,
    /// not scaled by cell size).
    #[must_use]
    pub fn to_point(self) -> Point3<f64> {
        Point3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Returns the 6 face-adjacent neighbors.
    ///
    /// # Example
    ///
    /// ```
    /// use aero_spatial::CellCoord;
    ///
    /// let neighbors = CellCoord::origin().face_neighbors();
    /// assert_eq!(neighbors.len(), 6);
    /// assert!(neighbors.contains(&CellCoord::new(0, 0, -1)));
    /// ```
    #[must_use]
    pub const fn face_neighbors(self) -> [Self; 6] {
        [
            Self::new(self.x.wrapping_add(1), self.y, self.z),
            Self::new(self.x.wrapping_sub(1), self.y, self.z),
            Self::new(self.x, self.y.wrapping_add(1), self.z),
            Self::new(self.x, self.y.wrapping_sub(1), self.z),
            Self::new(self.x, self.y, self.z.wrapping_add(1)),
            Self::new(self.x, self.y, self.z.wrapping_sub(1)),
        ]
    }

    /// Returns all 26 neighbors: 6 face-adjacent, 12 edge-adjacent, and
    /// 8 corner-adjacent.
    ///
    /// # Example
    ///
    /// ```
    /// use aero_spatial::CellCoord;
    ///
    /// let cell = CellCoord::new(5, 5, 5);
    /// let neighbors = cell.all_neighbors();
    /// assert_eq!(neighbors.len(), 26);
    /// assert!(!neighbors.contains(&cell));
    /// ```
    #[must_use]
    pub fn all_neighbors(self) -> [Self; 26] {
        let mut result = [Self::origin(); 26];
        let mut idx = 0;

        for dx in -1i32..=1 {
            for dy in -1i32..=1 {
                for dz in -1i32..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    result[idx] = Self::new(
                        self.x.wrapping_add(dx),
                        self.y.wrapping_add(dy),
                        self.z.wrapping_add(dz),
                    );
                    idx += 1;
                }
            }
        }

        result
    }
}

impl From<(i32, i32, i32)> for CellCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[i32; 3]> for CellCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl std::ops::Add for CellCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_add(other.x),
            self.y.wrapping_add(other.y),
            self.z.wrapping_add(other.z),
        )
    }
}

impl std::ops::Sub for CellCoord {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_sub(other.x),
            self.y.wrapping_sub(other.y),
            self.z.wrapping_sub(other.z),
        )
    }
}
