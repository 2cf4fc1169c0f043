//! Neighbor expansion over the cell lattice.

use aero_spatial::{CellCoord, NavGrid};
use aero_types::Connectivity;

use crate::heuristics::move_cost;

/// Generates traversable successors of a cell under a walkability predicate.
///
/// The predicate decides which cells may be entered; [`NeighborGen::for_grid`]
/// wires it to a [`NavGrid`], but searches that overlay extra rules (for
/// instance treating the start and goal cells as enterable regardless of the
/// stored flags) supply their own closure.
pub struct NeighborGen<F> {
    walkable: F,
    connectivity: Connectivity,
    cell_size: f64,
}

impl<F> NeighborGen<F>
where
    F: Fn(CellCoord) -> bool,
{
    /// Creates a generator from a walkability predicate.
    pub const fn new(walkable: F, connectivity: Connectivity, cell_size: f64) -> Self {
        Self {
            walkable,
            connectivity,
            cell_size,
        }
    }

    /// Returns the traversable neighbors of a cell.
    pub fn neighbors(&self, cell: CellCoord) -> Vec<CellCoord> {
        let candidates: Vec<CellCoord> = match self.connectivity {
            Connectivity::Face6 => cell.face_neighbors().to_vec(),
            Connectivity::Full26 => cell.all_neighbors().to_vec(),
        };
        candidates
            .into_iter()
            .filter(|&candidate| (self.walkable)(candidate))
            .collect()
    }

    /// Returns the traversable neighbors of a cell with their exact step
    /// costs.
    pub fn successors(&self, cell: CellCoord) -> Vec<(CellCoord, f64)> {
        self.neighbors(cell)
            .into_iter()
            .map(|neighbor| (neighbor, move_cost(cell, neighbor, self.cell_size)))
            .collect()
    }
}

impl<'a> NeighborGen<Box<dyn Fn(CellCoord) -> bool + 'a>> {
    /// Creates a generator that admits exactly the walkable cells of a grid.
    #[must_use]
    pub fn for_grid(grid: &'a NavGrid, connectivity: Connectivity) -> Self {
        let cell_size = grid.cell_size();
        Self::new(
            Box::new(move |cell| grid.is_walkable(cell)),
            connectivity,
            cell_size,
        )
    }
}
