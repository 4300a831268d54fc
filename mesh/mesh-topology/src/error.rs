//! Error types for topology construction.

use thiserror::Error;

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors raised while building adjacency from a face list.
///
/// All of these describe malformed input. Recoverable conditions such as
/// boundary edges are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// Face has fewer than three vertices.
    #[error("face {face} has {sides} vertices (need at least 3)")]
    DegenerateFace {
        /// Index of the offending face.
        face: usize,
        /// Number of vertices in the face.
        sides: usize,
    },

    /// Face lists the same vertex twice.
    #[error("face {face} repeats vertex {vertex}")]
    RepeatedVertex {
        /// Index of the offending face.
        face: usize,
        /// The repeated vertex index.
        vertex: u32,
    },

    /// Face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    IndexOutOfBounds {
        /// Index of the offending face.
        face: usize,
        /// The invalid vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Edge is shared by more than two faces.
    #[error("edge ({v0}, {v1}) is shared by {faces} faces (at most 2 supported)")]
    NonManifoldEdge {
        /// Smaller endpoint.
        v0: u32,
        /// Larger endpoint.
        v1: u32,
        /// Number of faces touching the edge.
        faces: usize,
    },

    /// Two faces contain the same directed edge.
    #[error("directed edge ({from} -> {to}) appears in faces {first} and {second}; winding is inconsistent")]
    InconsistentWinding {
        /// Start vertex of the half-edge.
        from: u32,
        /// End vertex of the half-edge.
        to: u32,
        /// Face that created the half-edge first.
        first: usize,
        /// Face that tried to create it again.
        second: usize,
    },
}
