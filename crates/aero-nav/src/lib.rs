//! The aeronav flight-navigation engine.
//!
//! Ties the spatial, pathfinding, and obstruction layers together:
//!
//! - [`build_grid`] samples a [`TraversalOracle`] over a world volume and
//!   produces the navigation grid
//! - [`ObstructionIndex`] precomputes which cells each toggleable region
//!   covers, so toggles cost time proportional to the region, not the grid
//! - [`FlightNavigator`] holds grid, regions, and the current path behind
//!   one lock, reports [`PathImpact`] on every toggle, and broadcasts it to
//!   channel subscribers on other threads
//!
//! # Example
//!
//! ```
//! use aero_nav::{FlightNavigator, ObstructionRegion, OpenSpace, PathImpact};
//! use aero_spatial::Aabb;
//! use aero_types::SearchConfig;
//! use nalgebra::Point3;
//!
//! let hangar = ObstructionRegion::new(Aabb::new(
//!     Point3::new(100.0, 0.0, 0.0),
//!     Point3::new(200.0, 300.0, 300.0),
//! ));
//! let nav = FlightNavigator::new(
//!     OpenSpace,
//!     SearchConfig::default(),
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(300.0, 300.0, 300.0),
//!     100.0,
//!     vec![hangar],
//! )
//! .unwrap();
//!
//! nav.find_path(Point3::new(50.0, 50.0, 50.0), Point3::new(250.0, 50.0, 50.0)).unwrap();
//!
//! let id = nav.region_ids()[0];
//! assert_eq!(nav.set_obstruction(id, true).unwrap(), PathImpact::Invalidated);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod builder;
pub mod navigator;
pub mod obstruction;
pub mod oracle;

pub use builder::build_grid;
pub use navigator::{FlightNavigator, PathImpact};
pub use obstruction::{ObstructionIndex, ObstructionRegion, RegionId, ToggleOutcome};
pub use oracle::{OpenSpace, TraversalOracle};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod integration_tests {
    use super::*;
    use aero_spatial::CellCoord;
    use aero_types::SearchConfig;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    /// Full scenario over a 3x3x3 airspace: plan a diagonal, block the
    /// middle layer, re-plan, clear it, and recover the original route.
    #[test]
    fn test_navigation_lifecycle() {
        let slab = ObstructionRegion::new(aero_spatial::Aabb::new(
            Point3::new(100.0, 0.0, 0.0),
            Point3::new(200.0, 300.0, 300.0),
        ));
        let nav = FlightNavigator::new(
            OpenSpace,
            SearchConfig::default(),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(300.0, 300.0, 300.0),
            100.0,
            vec![slab],
        )
        .unwrap();
        let id = nav.region_ids()[0];
        let rx = nav.subscribe();

        // Corner-to-corner diagonal: two corner moves of 100 * sqrt(3).
        let diagonal = nav
            .find_path(Point3::new(50.0, 50.0, 50.0), Point3::new(250.0, 250.0, 250.0))
            .unwrap();
        assert_eq!(
            diagonal.cells(),
            &[
                CellCoord::new(0, 0, 0),
                CellCoord::new(1, 1, 1),
                CellCoord::new(2, 2, 2),
            ]
        );
        assert_relative_eq!(diagonal.length(), 200.0 * 3.0_f64.sqrt(), epsilon = 1e-9);

        // Blocking the whole middle x-layer severs the airspace.
        assert_eq!(nav.set_obstruction(id, true).unwrap(), PathImpact::Invalidated);
        assert_eq!(rx.recv().unwrap(), PathImpact::Invalidated);

        let severed = nav
            .find_path(Point3::new(50.0, 50.0, 50.0), Point3::new(250.0, 250.0, 250.0))
            .unwrap();
        assert!(severed.is_empty());

        // Clearing restores the diagonal.
        assert_eq!(nav.set_obstruction(id, false).unwrap(), PathImpact::Clear);
        assert_eq!(rx.recv().unwrap(), PathImpact::Clear);

        let restored = nav
            .find_path(Point3::new(50.0, 50.0, 50.0), Point3::new(250.0, 250.0, 250.0))
            .unwrap();
        assert_eq!(restored, diagonal);
    }

    /// A partial obstruction forces a detour instead of severing the space.
    #[test]
    fn test_detour_around_partial_obstruction() {
        // Block the middle column but leave the top z-layer open.
        let pillar = ObstructionRegion::new(aero_spatial::Aabb::new(
            Point3::new(100.0, 0.0, 0.0),
            Point3::new(200.0, 300.0, 200.0),
        ));
        let nav = FlightNavigator::new(
            OpenSpace,
            SearchConfig::default(),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(300.0, 300.0, 300.0),
            100.0,
            vec![pillar],
        )
        .unwrap();
        let id = nav.region_ids()[0];

        nav.set_obstruction(id, true).unwrap();
        let detour = nav
            .find_path(Point3::new(50.0, 50.0, 50.0), Point3::new(250.0, 50.0, 50.0))
            .unwrap();

        assert!(!detour.is_empty());
        // The route climbs through the open top layer.
        assert!(detour.cells().iter().any(|cell| cell.z == 2));
        assert!(detour.cells().iter().all(|cell| {
            !(cell.x == 1 && cell.z < 2)
        }));
    }

    /// The oracle's verdict at build time and region toggles compose: a
    /// cell blocked by terrain stays blocked until a covering region both
    /// blocks and clears it.
    #[test]
    fn test_oracle_and_obstruction_compose() {
        let ceiling = |center: Point3<f64>, _: f64| center.z < 200.0;
        let slab = ObstructionRegion::new(aero_spatial::Aabb::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(300.0, 300.0, 100.0),
        ));
        let nav = FlightNavigator::new(
            ceiling,
            SearchConfig::default(),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(300.0, 300.0, 300.0),
            100.0,
            vec![slab],
        )
        .unwrap();
        let id = nav.region_ids()[0];

        // Ground layer open, so the straight route exists.
        let ground = nav
            .find_path(Point3::new(50.0, 50.0, 50.0), Point3::new(250.0, 50.0, 50.0))
            .unwrap();
        assert_eq!(ground.len(), 3);

        // Blocking the ground layer leaves only z = 1 below the ceiling.
        nav.set_obstruction(id, true).unwrap();
        let lifted = nav
            .find_path(Point3::new(50.0, 50.0, 150.0), Point3::new(250.0, 50.0, 150.0))
            .unwrap();
        assert_eq!(lifted.len(), 3);
        assert!(lifted.cells().iter().all(|cell| cell.z == 1));

        let grounded = nav
            .find_path(Point3::new(50.0, 50.0, 50.0), Point3::new(250.0, 50.0, 50.0))
            .unwrap();
        assert!(grounded.is_empty());
    }
}
