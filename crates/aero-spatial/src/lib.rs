//! Spatial data structures for the aeronav flight-navigation engine.
//!
//! This crate provides the foundational spatial types the navigation crates
//! build on:
//!
//! - [`CellCoord`] - Integer lattice coordinates identifying grid cells
//! - [`GridBounds`] - Axis-aligned bounds in cell space
//! - [`NavGrid`] - The traversability voxel grid
//! - [`Aabb`] and [`Sphere`] - World-space overlap primitives
//! - [`Octree`] - Generic point-object spatial partition with radius queries
//!
//! # Coordinate Systems
//!
//! World coordinates are continuous `f64` points. Cell coordinates are
//! discrete `i32` lattice indices anchored at the world origin: a world
//! position maps to the cell `floor(pos / cell_size)` per axis, and each
//! cell's canonical center is `index * cell_size + cell_size / 2`. Because
//! cells are keyed on integer indices, coordinate equality is exact, never
//! approximate.
//!
//! # Example
//!
//! ```
//! use aero_spatial::{CellCoord, NavGrid};
//! use nalgebra::Point3;
//!
//! let mut grid = NavGrid::try_new(100.0).unwrap();
//! grid.insert_cell(CellCoord::new(0, 0, 0), true);
//!
//! // World point (50, 50, 50) falls in cell (0, 0, 0)
//! assert_eq!(grid.world_to_cell(Point3::new(50.0, 50.0, 50.0)), CellCoord::new(0, 0, 0));
//! assert!(grid.is_walkable(CellCoord::new(0, 0, 0)));
//!
//! // The canonical center of cell (0, 0, 0) is (50, 50, 50)
//! let center = grid.cell_center(CellCoord::new(0, 0, 0));
//! assert_eq!(center, Point3::new(50.0, 50.0, 50.0));
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod coord;
pub mod error;
pub mod grid;
pub mod octree;
pub mod overlap;

pub use coord::CellCoord;
pub use error::SpatialError;
pub use grid::{GridBounds, GridBoundsIter, NavGrid};
pub use octree::{EntryId, Octree};
pub use overlap::{Aabb, Sphere};
