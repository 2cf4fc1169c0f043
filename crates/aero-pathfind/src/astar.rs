//! The A* search itself.

use aero_spatial::{CellCoord, NavGrid};
use aero_types::{FlightPath, NavError, SearchConfig};
use nalgebra::Point3;
use pathfinding::prelude::astar;
use tracing::debug;

use crate::heuristics::heuristic;
use crate::neighbors::NeighborGen;

/// Fixed-point scale for handing float costs to the search as `u64`.
/// Millimeter-ish resolution at cell sizes around one world unit.
const COST_SCALE: f64 = 1000.0;

/// A* pathfinder over a [`NavGrid`].
///
/// Searches borrow the grid immutably; all per-search state lives inside
/// [`Pathfinder::find_path`], so one finder can serve any number of
/// sequential searches.
#[derive(Debug, Clone, Copy)]
pub struct Pathfinder<'a> {
    grid: &'a NavGrid,
    config: SearchConfig,
}

impl<'a> Pathfinder<'a> {
    /// Creates a pathfinder over a grid.
    #[must_use]
    pub const fn new(grid: &'a NavGrid, config: SearchConfig) -> Self {
        Self { grid, config }
    }

    /// Searches for the cheapest path between two world positions.
    ///
    /// Both positions are canonicalized to their containing cells, and the
    /// path runs cell-center to cell-center. The start and goal cells are
    /// treated as enterable when they are merely absent from the grid, but
    /// a goal cell explicitly marked blocked stays blocked. When no route
    /// exists the search returns the empty path, not an error. Among
    /// equal-cost routes, which one is returned is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NonFiniteCoordinate`] if either position has a
    /// NaN or infinite component, [`NavError::OutOfRangeCoordinate`] if a
    /// position maps to a lattice index outside the `i32` range, and
    /// [`NavError::EmptyGrid`] if the grid holds no cells.
    pub fn find_path(
        &self,
        start: Point3<f64>,
        goal: Point3<f64>,
    ) -> Result<FlightPath, NavError> {
        for point in [start, goal] {
            if !point.iter().all(|axis| axis.is_finite()) {
                return Err(NavError::NonFiniteCoordinate(point));
            }
        }
        if self.grid.is_empty() {
            return Err(NavError::EmptyGrid);
        }

        let cell_size = self.grid.cell_size();
        let start_cell = self
            .grid
            .world_to_cell_checked(start)
            .ok_or(NavError::OutOfRangeCoordinate(start))?;
        let goal_cell = self
            .grid
            .world_to_cell_checked(goal)
            .ok_or(NavError::OutOfRangeCoordinate(goal))?;

        if start_cell == goal_cell {
            return Ok(FlightPath::from_cells(vec![start_cell], cell_size));
        }

        let grid = self.grid;
        let successors = NeighborGen::new(
            move |cell: CellCoord| {
                grid.get(cell)
                    .unwrap_or(cell == start_cell || cell == goal_cell)
            },
            self.config.connectivity,
            cell_size,
        );

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let result = astar(
            &start_cell,
            |&cell| {
                successors
                    .successors(cell)
                    .into_iter()
                    .map(|(neighbor, cost)| (neighbor, (cost * COST_SCALE).round() as u64))
                    .collect::<Vec<_>>()
            },
            |&cell| (heuristic(cell, goal_cell, cell_size) * COST_SCALE).round() as u64,
            |&cell| cell == goal_cell,
        );

        match result {
            Some((cells, _)) => {
                let path = FlightPath::from_cells(cells, cell_size);
                debug!(cells = path.len(), length = path.length(), "path found");
                Ok(path)
            }
            None => {
                debug!("frontier exhausted, no path");
                Ok(FlightPath::empty())
            }
        }
    }
}
