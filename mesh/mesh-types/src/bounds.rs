//! Axis-aligned bounds of point sets.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned box spanning `min..=max`.
///
/// Approximating schemes pull vertices toward their neighbors, so the bounds
/// of a refined mesh never exceed those of its control mesh. Use
/// [`crate::PolyMesh::bounds`] to compare levels.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let polyline = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(4.0, -1.0, 2.0),
///     Point3::new(1.0, 3.0, 0.5),
/// ];
///
/// let bounds = Aabb::from_points(polyline.iter());
/// assert_eq!(bounds.min, Point3::new(0.0, -1.0, 0.0));
/// assert_eq!(bounds.max, Point3::new(4.0, 3.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Componentwise minimum.
    pub min: Point3<f64>,
    /// Componentwise maximum.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Inverted box (`min = +inf`, `max = -inf`) that any point expands.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::from(Vector3::repeat(f64::INFINITY)),
            max: Point3::from(Vector3::repeat(f64::NEG_INFINITY)),
        }
    }

    /// Smallest box holding every point; [`Self::empty`] for no points.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        points.fold(Self::empty(), |mut aabb, p| {
            aabb.expand_to_include(p);
            aabb
        })
    }

    /// Grow the box so it holds `point`.
    #[inline]
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// True until the first point is added.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    /// Extent along each axis.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Midpoint of `min` and `max`.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_point_makes_it_non_empty() {
        let mut aabb = Aabb::default();
        assert!(aabb.is_empty());
        assert!(Aabb::from_points(std::iter::empty()).is_empty());

        aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, aabb.max);
        assert_relative_eq!(aabb.size().norm(), 0.0);
    }

    #[test]
    fn center_and_size() {
        let pts = [Point3::new(-1.0, -2.0, -3.0), Point3::new(1.0, 2.0, 3.0)];
        let aabb = Aabb::from_points(pts.iter());
        assert_eq!(aabb.center(), Point3::origin());
        assert_relative_eq!(aabb.size(), Vector3::new(2.0, 4.0, 6.0));
    }
}
