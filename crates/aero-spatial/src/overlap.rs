//! World-space overlap primitives.
//!
//! Obstruction regions are axis-aligned boxes and octree radius queries are
//! spheres, so the only intersection tests the engine needs are box/box,
//! box/point, and sphere/box.

use nalgebra::{Point3, Vector3};

/// An axis-aligned bounding box in world space.
///
/// # Example
///
/// ```
/// use aero_spatial::Aabb;
/// use nalgebra::Point3;
///
/// let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
/// let b = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0));
/// assert!(a.intersects(&b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Creates a box from two corners, reordering so min ≤ max per axis.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates a box from a center and half-extents.
    #[must_use]
    pub fn from_center(center: Point3<f64>, half_extents: Vector3<f64>) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the half-extents of the box.
    #[must_use]
    pub fn half_extents(&self) -> Vector3<f64> {
        (self.max - self.min) * 0.5
    }

    /// Checks whether a point lies inside the box. Boundaries are inclusive.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Checks whether two boxes overlap. Touching faces count as overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// A sphere in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    /// Center point.
    pub center: Point3<f64>,
    /// Radius in world units. Never negative.
    pub radius: f64,
}

impl Sphere {
    /// Creates a sphere, clamping a negative radius to zero.
    #[must_use]
    pub fn new(center: Point3<f64>, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Checks whether a point lies inside the sphere (inclusive).
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }

    /// Checks whether the sphere overlaps a box, by clamping the sphere
    /// center to the box and comparing the residual distance to the radius.
    ///
    /// # Example
    ///
    /// ```
    /// use aero_spatial::{Aabb, Sphere};
    /// use nalgebra::Point3;
    ///
    /// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    /// let near = Sphere::new(Point3::new(1.5, 0.5, 0.5), 0.6);
    /// let far = Sphere::new(Point3::new(3.0, 0.5, 0.5), 0.6);
    /// assert!(near.intersects_aabb(&aabb));
    /// assert!(!far.intersects_aabb(&aabb));
    /// ```
    #[must_use]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let closest = Point3::new(
            self.center.x.clamp(aabb.min.x, aabb.max.x),
            self.center.y.clamp(aabb.min.y, aabb.max.y),
            self.center.z.clamp(aabb.min.z, aabb.max.z),
        );
        (closest - self.center).norm_squared() <= self.radius * self.radius
    }
}
