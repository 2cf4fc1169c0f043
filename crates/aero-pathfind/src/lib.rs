//! A* search over the aeronav voxel grid.
//!
//! The search runs on the integer cell lattice: world positions are
//! canonicalized to their containing cells, expanded through face or full
//! 26-connectivity, and scored with straight-line Euclidean costs. Step
//! costs are exact per move class (`cell_size`, `cell_size * sqrt(2)`,
//! `cell_size * sqrt(3)`), so the Euclidean heuristic never overestimates
//! and the first goal expansion is optimal.
//!
//! # Example
//!
//! ```
//! use aero_pathfind::Pathfinder;
//! use aero_spatial::{CellCoord, NavGrid};
//! use aero_types::SearchConfig;
//! use nalgebra::Point3;
//!
//! let mut grid = NavGrid::try_new(1.0).unwrap();
//! for x in 0..4 {
//!     grid.insert_cell(CellCoord::new(x, 0, 0), true);
//! }
//!
//! let finder = Pathfinder::new(&grid, SearchConfig::default());
//! let path = finder.find_path(Point3::new(0.5, 0.5, 0.5), Point3::new(3.5, 0.5, 0.5)).unwrap();
//! assert_eq!(path.len(), 4);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod astar;
pub mod heuristics;
pub mod neighbors;

pub use astar::Pathfinder;
pub use neighbors::NeighborGen;
