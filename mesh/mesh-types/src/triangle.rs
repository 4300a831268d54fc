//! Triangles with concrete corner positions.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Three corner positions, wound counter-clockwise seen from the front.
///
/// Obtained from a triangle face with [`crate::PolyMesh::triangle`], or built
/// directly when a scheme needs to test the orientation of a candidate face
/// before emitting it.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// );
///
/// assert!((tri.area() - 2.0).abs() < 1e-12);
/// assert!(tri.unit_normal().is_some_and(|n| n.z > 0.999));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First corner.
    pub v0: Point3<f64>,
    /// Second corner.
    pub v1: Point3<f64>,
    /// Third corner.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Triangle from three corners in winding order.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// `(v1 - v0) x (v2 - v0)`. Its length is twice the area.
    #[inline]
    #[must_use]
    pub fn normal(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Normalized [`Self::normal`], or `None` when the corners are collinear.
    #[must_use]
    pub fn unit_normal(&self) -> Option<Vector3<f64>> {
        self.normal().try_normalize(f64::EPSILON)
    }

    /// Whether the winding faces the same side as `direction`.
    ///
    /// Degenerate triangles and perpendicular directions face neither way.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Triangle, Point3, Vector3};
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// );
    /// assert!(tri.faces_along(&Vector3::z()));
    /// assert!(!tri.faces_along(&-Vector3::z()));
    /// ```
    #[inline]
    #[must_use]
    pub fn faces_along(&self, direction: &Vector3<f64>) -> bool {
        self.normal().dot(direction) > 0.0
    }

    /// Half the length of [`Self::normal`].
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.normal().norm()
    }

    /// Mean of the three corners.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }
}
