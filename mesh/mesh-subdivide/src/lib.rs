//! Mesh and curve subdivision algorithms.
//!
//! This crate refines coarse polygon meshes into smoother, denser ones:
//!
//! - **Catmull-Clark**: approximating scheme for arbitrary polygons; every
//!   k-gon becomes k quads
//! - **Loop**: approximating scheme for triangle meshes; every triangle
//!   becomes 4
//! - **Butterfly**: interpolating scheme for triangle meshes; original
//!   vertices never move
//! - **√3 (Kobbelt)**: approximating scheme for triangle meshes that inserts
//!   one vertex per face and flips the old edges; face count triples
//!
//! plus **Chaikin** corner cutting for polylines. Chaikin takes points, not a
//! mesh, so it has its own entry point [`subdivide_polyline`] with
//! [`ChaikinParams`] rather than a [`SubdivisionMethod`] variant.
//!
//! Every pass rebuilds adjacency from the face list (see `mesh-topology`),
//! keeps original vertices at their indices and appends new vertices after
//! them. Passes are pure functions of their input mesh.
//!
//! # Examples
//!
//! Catmull-Clark on the unit cube:
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_subdivide::{subdivide_mesh, SubdivideParams};
//!
//! let result = subdivide_mesh(&unit_cube(), &SubdivideParams::catmull_clark())?;
//!
//! assert_eq!(result.final_vertices, 26);
//! assert_eq!(result.final_faces, 24);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```
//!
//! Triangle schemes, several passes:
//!
//! ```
//! use mesh_types::octahedron;
//! use mesh_subdivide::{subdivide_mesh, SubdivideParams};
//!
//! let params = SubdivideParams::loop_subdivision().with_iterations(2);
//! let result = subdivide_mesh(&octahedron(), &params)?;
//!
//! // 8 * 4^2 faces after 2 iterations
//! assert_eq!(result.final_faces, 128);
//!
//! // Butterfly interpolates: the octahedron corners stay put
//! let result = subdivide_mesh(&octahedron(), &SubdivideParams::butterfly())?;
//! assert_eq!(result.mesh.vertices[0].position.x, 1.0);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```
//!
//! Chaikin corner cutting:
//!
//! ```
//! use mesh_subdivide::{subdivide_polyline, ChaikinParams};
//! use nalgebra::Point3;
//!
//! let square = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let params = ChaikinParams::classic().with_closed(true).with_iterations(2);
//! let smooth = subdivide_polyline(&square, &params)?;
//!
//! assert_eq!(smooth.len(), 16);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod blend;
mod butterfly;
mod catmull_clark;
mod chaikin;
mod error;
mod loop_subdiv;
mod params;
mod result;
mod scheme;
mod sqrt3;
mod subdivide;

pub use butterfly::ButterflyStencil;
pub use chaikin::subdivide_polyline;
pub use error::{SubdivideError, SubdivideResult};
pub use loop_subdiv::loop_alpha;
pub use params::{ChaikinParams, Sqrt3Boundary, SubdivideParams, SubdivisionMethod};
pub use result::SubdivisionResult;
pub use scheme::{Butterfly, CatmullClark, Kobbelt, LoopScheme, PassOutput, SubdivisionScheme};
pub use sqrt3::sqrt3_alpha;
pub use subdivide::{subdivide_mesh, subdivide_once};
