//! Traversability oracles.
//!
//! Grid construction asks an oracle, once per candidate cell, whether the
//! airspace at that cell's canonical center is clear. Production oracles
//! wrap collision queries against world geometry; tests and demos use
//! closures or [`OpenSpace`].

use nalgebra::Point3;

/// Answers whether a cell of airspace is traversable.
///
/// Called once per candidate cell during grid construction with the cell's
/// canonical center and edge length. Implementations must be deterministic
/// for the duration of a build.
pub trait TraversalOracle {
    /// Returns `true` if an aircraft may occupy the cell centered at
    /// `center` with edge length `cell_size`.
    fn is_traversable(&self, center: Point3<f64>, cell_size: f64) -> bool;
}

impl<F> TraversalOracle for F
where
    F: Fn(Point3<f64>, f64) -> bool,
{
    fn is_traversable(&self, center: Point3<f64>, cell_size: f64) -> bool {
        self(center, cell_size)
    }
}

/// The trivial oracle: every cell is clear.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSpace;

impl TraversalOracle for OpenSpace {
    fn is_traversable(&self, _center: Point3<f64>, _cell_size: f64) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_open_space_always_clear() {
        assert!(OpenSpace.is_traversable(Point3::new(1e9, -1e9, 0.0), 5.0));
    }

    #[test]
    fn test_closure_oracle() {
        let below_ceiling = |center: Point3<f64>, _: f64| center.z < 100.0;
        assert!(below_ceiling.is_traversable(Point3::new(0.0, 0.0, 50.0), 10.0));
        assert!(!below_ceiling.is_traversable(Point3::new(0.0, 0.0, 150.0), 10.0));
    }
}
