//! Subdivision parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scheme::{Butterfly, CatmullClark, Kobbelt, LoopScheme, SubdivisionScheme};

/// Mesh subdivision algorithm to use.
///
/// Polylines are refined by [`crate::subdivide_polyline`] instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SubdivisionMethod {
    /// Catmull-Clark - approximating scheme for arbitrary polygons.
    /// Every k-gon becomes k quads.
    #[default]
    CatmullClark,

    /// Loop - approximating scheme for triangle meshes.
    /// Every triangle becomes 4.
    Loop,

    /// Butterfly - interpolating scheme for triangle meshes.
    /// Original vertices never move; every triangle becomes 4.
    Butterfly,

    /// Kobbelt's sqrt(3) - approximating scheme for triangle meshes.
    /// One vertex per face and edge flips; face count triples.
    Kobbelt,
}

impl SubdivisionMethod {
    /// All mesh schemes, in declaration order.
    pub const ALL: [Self; 4] = [Self::CatmullClark, Self::Loop, Self::Butterfly, Self::Kobbelt];

    /// Strategy object implementing this method.
    #[must_use]
    pub fn scheme(self) -> &'static dyn SubdivisionScheme {
        match self {
            Self::CatmullClark => &CatmullClark,
            Self::Loop => &LoopScheme,
            Self::Butterfly => &Butterfly,
            Self::Kobbelt => &Kobbelt,
        }
    }

    /// Check if this method only accepts triangle meshes.
    #[must_use]
    pub const fn requires_triangles(&self) -> bool {
        !matches!(self, Self::CatmullClark)
    }

    /// Check if this method keeps original vertices in place.
    #[must_use]
    pub const fn is_interpolating(&self) -> bool {
        matches!(self, Self::Butterfly)
    }
}

/// How the sqrt(3) scheme treats edges with only one adjacent face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sqrt3Boundary {
    /// Keep the unflipped fan triangle on every boundary edge.
    #[default]
    Retain,

    /// Fail with [`crate::SubdivideError::BoundaryNotSupported`].
    Reject,
}

/// Parameters for mesh subdivision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubdivideParams {
    /// Subdivision method to use.
    pub method: SubdivisionMethod,

    /// Number of subdivision iterations. Zero returns the input unchanged.
    pub iterations: u32,

    /// Maximum faces allowed in result (prevents memory issues).
    pub max_faces: usize,

    /// Boundary rule for [`SubdivisionMethod::Kobbelt`].
    pub sqrt3_boundary: Sqrt3Boundary,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            method: SubdivisionMethod::default(),
            iterations: 1,
            max_faces: 10_000_000, // 10M faces max
            sqrt3_boundary: Sqrt3Boundary::default(),
        }
    }
}

impl SubdivideParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters for Catmull-Clark subdivision.
    #[must_use]
    pub fn catmull_clark() -> Self {
        Self::default().with_method(SubdivisionMethod::CatmullClark)
    }

    /// Create parameters for Loop subdivision.
    #[must_use]
    pub fn loop_subdivision() -> Self {
        Self::default().with_method(SubdivisionMethod::Loop)
    }

    /// Create parameters for Butterfly subdivision.
    #[must_use]
    pub fn butterfly() -> Self {
        Self::default().with_method(SubdivisionMethod::Butterfly)
    }

    /// Create parameters for sqrt(3) subdivision.
    #[must_use]
    pub fn kobbelt() -> Self {
        Self::default().with_method(SubdivisionMethod::Kobbelt)
    }

    /// Set subdivision method.
    #[must_use]
    pub const fn with_method(mut self, method: SubdivisionMethod) -> Self {
        self.method = method;
        self
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set maximum faces allowed.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Set the sqrt(3) boundary rule.
    #[must_use]
    pub const fn with_sqrt3_boundary(mut self, boundary: Sqrt3Boundary) -> Self {
        self.sqrt3_boundary = boundary;
        self
    }
}

/// Parameters for Chaikin corner cutting.
///
/// Each pass replaces every segment `(p0, p1)` with the two points
/// `lerp(p0, p1, min(u, v))` and `lerp(p0, p1, max(u, v))`.
///
/// # Example
///
/// ```
/// use mesh_subdivide::ChaikinParams;
///
/// let params = ChaikinParams::new(0.6, 0.8).normalized();
/// assert!((params.u + params.v - 1.0).abs() < 1e-12);
/// assert!((params.u - 0.6 / 1.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChaikinParams {
    /// First blend parameter in `[0, 1]`.
    pub u: f64,

    /// Second blend parameter in `[0, 1]`.
    pub v: f64,

    /// Number of refinement passes. Zero returns the input unchanged.
    pub iterations: u32,

    /// Keep the first and last input points (open curves only).
    pub retain_endpoints: bool,

    /// Treat the points as a closed loop and also cut the last-to-first segment.
    pub closed: bool,
}

impl Default for ChaikinParams {
    fn default() -> Self {
        Self::classic()
    }
}

impl ChaikinParams {
    /// Classic Chaikin (`u = 0.25`, `v = 0.75`), one open pass.
    #[must_use]
    pub const fn classic() -> Self {
        Self::new(0.25, 0.75)
    }

    /// Custom blend parameters, one open pass.
    #[must_use]
    pub const fn new(u: f64, v: f64) -> Self {
        Self {
            u,
            v,
            iterations: 1,
            retain_endpoints: false,
            closed: false,
        }
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set whether the first and last points survive each pass.
    #[must_use]
    pub const fn with_retain_endpoints(mut self, retain: bool) -> Self {
        self.retain_endpoints = retain;
        self
    }

    /// Set whether the polyline is a closed loop.
    #[must_use]
    pub const fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Scale `u` and `v` down proportionally so that `u + v <= 1`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let sum = self.u + self.v;
        if sum > 1.0 {
            self.u /= sum;
            self.v /= sum;
        }
        self
    }

    /// Check that both blend parameters are finite and within `[0, 1]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let in_range = |t: f64| t.is_finite() && (0.0..=1.0).contains(&t);
        in_range(self.u) && in_range(self.v)
    }

    /// Number of points produced from `input_len` points after all passes.
    #[must_use]
    pub fn output_len(&self, input_len: usize) -> usize {
        let mut len = input_len;
        for _ in 0..self.iterations {
            len = if self.closed {
                len.saturating_mul(2)
            } else {
                let cut = len.saturating_sub(1).saturating_mul(2);
                if self.retain_endpoints { cut + 2 } else { cut }
            };
        }
        len
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SubdivideParams::default();
        assert_eq!(params.method, SubdivisionMethod::CatmullClark);
        assert_eq!(params.iterations, 1);
        assert_eq!(params.max_faces, 10_000_000);
        assert_eq!(params.sqrt3_boundary, Sqrt3Boundary::Retain);
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            SubdivideParams::loop_subdivision().method,
            SubdivisionMethod::Loop
        );
        assert_eq!(
            SubdivideParams::butterfly().method,
            SubdivisionMethod::Butterfly
        );
        assert_eq!(SubdivideParams::kobbelt().method, SubdivisionMethod::Kobbelt);
        assert_eq!(
            SubdivideParams::catmull_clark().method,
            SubdivisionMethod::CatmullClark
        );
    }

    #[test]
    fn test_builder() {
        let params = SubdivideParams::new()
            .with_method(SubdivisionMethod::Loop)
            .with_iterations(2)
            .with_max_faces(1_000_000)
            .with_sqrt3_boundary(Sqrt3Boundary::Reject);

        assert_eq!(params.method, SubdivisionMethod::Loop);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.max_faces, 1_000_000);
        assert_eq!(params.sqrt3_boundary, Sqrt3Boundary::Reject);
    }

    #[test]
    fn test_method_traits() {
        assert!(!SubdivisionMethod::CatmullClark.requires_triangles());
        assert!(SubdivisionMethod::Loop.requires_triangles());
        assert!(SubdivisionMethod::Butterfly.is_interpolating());
        assert!(!SubdivisionMethod::Kobbelt.is_interpolating());

        for method in SubdivisionMethod::ALL {
            assert_eq!(method.scheme().requires_triangles(), method.requires_triangles());
        }
    }

    #[test]
    fn chaikin_classic() {
        let params = ChaikinParams::default();
        assert_eq!(params.u, 0.25);
        assert_eq!(params.v, 0.75);
        assert!(params.is_valid());
        assert_eq!(params.normalized(), params);
    }

    #[test]
    fn chaikin_validity() {
        assert!(!ChaikinParams::new(-0.1, 0.5).is_valid());
        assert!(!ChaikinParams::new(0.1, 1.5).is_valid());
        assert!(!ChaikinParams::new(f64::NAN, 0.5).is_valid());
        assert!(ChaikinParams::new(0.0, 1.0).is_valid());
    }

    #[test]
    fn chaikin_output_len() {
        let open = ChaikinParams::classic().with_iterations(2);
        // 3 -> 4 -> 6
        assert_eq!(open.output_len(3), 6);

        let kept = open.with_retain_endpoints(true);
        // 3 -> 6 -> 12
        assert_eq!(kept.output_len(3), 12);

        let closed = open.with_closed(true);
        assert_eq!(closed.output_len(3), 12);
    }
}
