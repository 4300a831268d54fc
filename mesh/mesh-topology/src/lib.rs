//! Connectivity structures rebuilt for every subdivision pass.
//!
//! Subdivision schemes need three views of a face list:
//!
//! - [`EdgeTable`] - undirected edges and the faces touching each one
//! - [`HalfEdgeMesh`] - directed half-edges with `next`/`opposite` links,
//!   stored in a flat arena and addressed by `u32` indices
//! - [`VertexNeighbors`] - the distinct neighbors of each vertex
//!
//! All three number their elements in order of first appearance while
//! walking the faces, never by hash order, so output laid out from them is
//! reproducible.
//!
//! [`validate_faces`] is the strict input check every pass runs first;
//! [`analyze`] produces a [`TopologyReport`] for diagnostics.
//!
//! # Example
//!
//! ```
//! use mesh_topology::{validate_faces, EdgeTable, VertexNeighbors};
//! use mesh_types::unit_cube;
//!
//! let cube = unit_cube();
//! validate_faces(cube.vertex_count(), &cube.faces)?;
//!
//! let edges = EdgeTable::build(&cube.faces)?;
//! assert_eq!(edges.len(), 12);
//! assert!(edges.is_closed());
//!
//! let neighbors = VertexNeighbors::build(cube.vertex_count(), &cube.faces);
//! assert_eq!(neighbors.valence(0), 3);
//! # Ok::<(), mesh_topology::TopologyError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod edges;
mod error;
mod half_edge;
mod neighbors;
mod validate;

pub use edges::{normalize_edge, triangle_apex, Edge, EdgeTable};
pub use error::{TopologyError, TopologyResult};
pub use half_edge::{HalfEdge, HalfEdgeMesh};
pub use neighbors::VertexNeighbors;
pub use validate::{analyze, check_winding, validate_faces, TopologyReport};
