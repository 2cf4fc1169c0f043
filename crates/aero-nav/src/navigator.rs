//! The navigator facade: one grid, one obstruction index, one current path,
//! behind a single lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use aero_pathfind::Pathfinder;
use aero_spatial::NavGrid;
use aero_types::{FlightPath, NavError, SearchConfig};
use crossbeam_channel::{unbounded, Receiver, Sender};
use nalgebra::Point3;
use tracing::{debug, info};

use crate::builder::build_grid;
use crate::obstruction::{ObstructionIndex, ObstructionRegion, RegionId};
use crate::oracle::TraversalOracle;

/// What an obstruction toggle meant for the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathImpact {
    /// The current path is unaffected.
    Clear,
    /// A region turned blocked under the current path; it should be
    /// re-planned.
    Invalidated,
}

struct Inner {
    grid: NavGrid,
    index: ObstructionIndex,
    path: FlightPath,
}

/// Thread-safe navigation facade over a grid, its obstruction regions, and
/// the most recent path.
///
/// All state sits behind one mutex: searches, toggles, and rebuilds each
/// take the lock for their whole duration, so a toggle never observes a
/// half-finished search. Cross-thread consumers receive [`PathImpact`]
/// events through [`FlightNavigator::subscribe`] and decide on their own
/// thread how to react; the navigator never re-plans on its own.
///
/// # Example
///
/// ```
/// use aero_nav::{FlightNavigator, OpenSpace};
/// use aero_types::SearchConfig;
/// use nalgebra::Point3;
///
/// let nav = FlightNavigator::new(
///     OpenSpace,
///     SearchConfig::default(),
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(300.0, 300.0, 300.0),
///     100.0,
///     Vec::new(),
/// )
/// .unwrap();
///
/// let path = nav.find_path(Point3::new(50.0, 50.0, 50.0), Point3::new(250.0, 250.0, 250.0)).unwrap();
/// assert!(!path.is_empty());
/// ```
pub struct FlightNavigator<O> {
    oracle: O,
    config: SearchConfig,
    inner: Mutex<Inner>,
    subscribers: Mutex<Vec<Sender<PathImpact>>>,
}

impl<O: TraversalOracle> FlightNavigator<O> {
    /// Builds the grid for a world volume and registers the obstruction
    /// regions.
    ///
    /// # Errors
    ///
    /// Propagates the validation errors of [`build_grid`] and
    /// [`ObstructionIndex::register`].
    pub fn new(
        oracle: O,
        config: SearchConfig,
        min: Point3<f64>,
        max: Point3<f64>,
        cell_size: f64,
        regions: Vec<ObstructionRegion>,
    ) -> Result<Self, NavError> {
        let grid = build_grid(min, max, cell_size, &oracle)?;
        let index = ObstructionIndex::register(regions, cell_size)?;
        info!(cells = grid.len(), regions = index.len(), "navigator ready");

        Ok(Self {
            oracle,
            config,
            inner: Mutex::new(Inner {
                grid,
                index,
                path: FlightPath::empty(),
            }),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    /// Rebuilds the grid and obstruction index for new bounds or a new cell
    /// size. The stored path is discarded; subscribers are not notified.
    ///
    /// # Errors
    ///
    /// On a validation error the previous grid and index are left in place.
    pub fn rebuild(
        &self,
        min: Point3<f64>,
        max: Point3<f64>,
        cell_size: f64,
        regions: Vec<ObstructionRegion>,
    ) -> Result<(), NavError> {
        let grid = build_grid(min, max, cell_size, &self.oracle)?;
        let index = ObstructionIndex::register(regions, cell_size)?;
        info!(cells = grid.len(), regions = index.len(), "grid rebuilt");

        let mut inner = self.lock_inner();
        inner.grid = grid;
        inner.index = index;
        inner.path = FlightPath::empty();
        Ok(())
    }

    /// Searches for a path between two world positions and stores the
    /// result as the current path. An empty result means no route exists.
    ///
    /// # Errors
    ///
    /// Propagates [`Pathfinder::find_path`] errors.
    pub fn find_path(
        &self,
        start: Point3<f64>,
        goal: Point3<f64>,
    ) -> Result<FlightPath, NavError> {
        let mut inner = self.lock_inner();
        let path = Pathfinder::new(&inner.grid, self.config).find_path(start, goal)?;
        inner.path = path.clone();
        Ok(path)
    }

    /// Returns a copy of the most recently found path.
    #[must_use]
    pub fn current_path(&self) -> FlightPath {
        self.lock_inner().path.clone()
    }

    /// Toggles an obstruction region and reports what it meant for the
    /// current path. The impact is also broadcast to every subscriber.
    ///
    /// Only a region turning blocked under the path invalidates it; a
    /// region clearing never does.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::UnknownRegion`] for an unregistered id.
    pub fn set_obstruction(&self, id: RegionId, blocked: bool) -> Result<PathImpact, NavError> {
        let impact = {
            let mut inner = self.lock_inner();
            let Inner { grid, index, path } = &mut *inner;
            let outcome = index.apply(grid, id, blocked, Some(path))?;
            if blocked && outcome.path_hit {
                PathImpact::Invalidated
            } else {
                PathImpact::Clear
            }
        };

        self.broadcast(impact);
        Ok(impact)
    }

    /// Returns the ids of all registered obstruction regions.
    #[must_use]
    pub fn region_ids(&self) -> Vec<RegionId> {
        self.lock_inner().index.ids().collect()
    }

    /// Registers a channel that receives the [`PathImpact`] of every
    /// subsequent obstruction toggle. Dropped receivers are pruned on the
    /// next broadcast.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<PathImpact> {
        let (tx, rx) = unbounded();
        self.lock_subscribers().push(tx);
        rx
    }

    fn broadcast(&self, impact: PathImpact) {
        let mut subscribers = self.lock_subscribers();
        subscribers.retain(|tx| tx.send(impact).is_ok());
        debug!(?impact, listeners = subscribers.len(), "impact broadcast");
    }

    // A poisoned lock only means another thread panicked mid-update of the
    // walkable flags; the data itself stays consistent, so keep going.
    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<Sender<PathImpact>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
