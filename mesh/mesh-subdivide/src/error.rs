//! Error types for mesh subdivision operations.

use mesh_topology::TopologyError;
use thiserror::Error;

/// Errors that can occur during subdivision operations.
///
/// Only caller errors are reported here. Local recoveries (an incomplete
/// Butterfly stencil, a vertex with no adjacent faces) are handled in place
/// and counted in [`crate::SubdivisionResult`].
#[derive(Debug, Error)]
pub enum SubdivideError {
    /// Mesh has no vertices.
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// Mesh has no faces.
    #[error("Mesh has no faces")]
    NoFaces,

    /// A triangle-only scheme was given a polygon.
    #[error("{scheme} requires triangles, but face {face} has {sides} vertices")]
    NonTriangularFace {
        /// Scheme that rejected the input.
        scheme: &'static str,
        /// Index of the offending face.
        face: usize,
        /// Number of vertices in the face.
        sides: usize,
    },

    /// The sqrt(3) scheme was configured to reject open meshes.
    #[error("Sqrt3 subdivision rejects open meshes ({edges} boundary edges)")]
    BoundaryNotSupported {
        /// Number of boundary edges found.
        edges: usize,
    },

    /// Mesh would exceed maximum size.
    #[error("Subdivision would exceed maximum mesh size ({current} -> {projected} faces, max {max})")]
    MeshTooLarge {
        /// Current face count.
        current: usize,
        /// Projected face count after subdivision.
        projected: usize,
        /// Maximum allowed face count.
        max: usize,
    },

    /// Polyline is too short to refine.
    #[error("Polyline needs at least {required} points, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points.
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// Chaikin blend parameters out of range.
    #[error("Invalid Chaikin blend (u = {u}, v = {v}); both must be finite and within [0, 1]")]
    InvalidBlend {
        /// First blend parameter.
        u: f64,
        /// Second blend parameter.
        v: f64,
    },

    /// Face list is malformed.
    #[error("Invalid topology: {0}")]
    Topology(#[from] TopologyError),
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
