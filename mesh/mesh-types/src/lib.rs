//! Polygon mesh model for the subdivision crates.
//!
//! This crate provides the data representation every subdivision scheme reads
//! and writes:
//!
//! - [`Vertex`] - A 3D position with an optional texture coordinate
//! - [`Face`] - An ordered, cyclic list of vertex indices
//! - [`PolyMesh`] - Vertices plus faces of arbitrary arity
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! Seed meshes ([`unit_cube`], [`triangulated_cube`], [`tetrahedron`],
//! [`octahedron`], [`quad_grid`]) are provided for callers and tests.
//!
//! # Conventions
//!
//! Coordinates are `f64` and unit-agnostic. Faces are wound
//! **counter-clockwise (CCW) when viewed from outside**; consecutive index
//! pairs (wrapping) are the face's boundary edges.
//!
//! Indices are stable within one subdivision pass. Every scheme keeps the
//! original vertices first, in their original relative order, and appends
//! the new vertices after them.
//!
//! # Example
//!
//! ```
//! use mesh_types::{PolyMesh, Vertex, Face};
//!
//! let mut mesh = PolyMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push(Face::from_slice(&[0, 1, 2, 3]));
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_triangle_mesh());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod primitives;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{Face, PolyMesh};
pub use primitives::{octahedron, quad_grid, tetrahedron, triangulated_cube, unit_cube};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};
