//! Kobbelt's √3 subdivision for triangle meshes.
//!
//! Each pass inserts one vertex at the centroid of every face, connects it
//! to the face corners, and flips every original interior edge so that it
//! joins the two centroids on either side. Original vertices are smoothed
//! toward their neighbors. Face count triples per pass on closed meshes.
//!
//! Output layout is `[smoothed original vertices][face centroids]`; faces
//! are the surviving fan triangles (face order) followed by the flip
//! triangles (edge order).

// Algorithm uses many indexing operations
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use mesh_topology::{EdgeTable, VertexNeighbors};
use mesh_types::{Face, PolyMesh, Triangle};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;
use tracing::warn;

use crate::blend::{VertexBlend, mean_position};
use crate::error::{SubdivideError, SubdivideResult};
use crate::params::{Sqrt3Boundary, SubdivideParams, SubdivisionMethod};
use crate::scheme::{PassOutput, SubdivisionScheme, grow, validate_input};

/// √3 scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kobbelt;

impl SubdivisionScheme for Kobbelt {
    fn name(&self) -> &'static str {
        "Sqrt3"
    }

    fn method(&self) -> SubdivisionMethod {
        SubdivisionMethod::Kobbelt
    }

    fn requires_triangles(&self) -> bool {
        true
    }

    /// Exact for closed meshes; an upper bound when boundary edges are
    /// retained.
    fn projected_faces(&self, mesh: &PolyMesh, iterations: u32) -> usize {
        grow(mesh.face_count(), 3, iterations)
    }

    fn subdivide_once(
        &self,
        mesh: &PolyMesh,
        params: &SubdivideParams,
    ) -> SubdivideResult<PassOutput> {
        validate_input(mesh, self)?;
        sqrt3_pass(mesh, params.sqrt3_boundary).map(PassOutput::from)
    }
}

/// Smoothing weight for valence `n`: `(4 - 2 cos(2π/n)) / 9`.
#[must_use]
pub fn sqrt3_alpha(n: usize) -> f64 {
    2.0f64.mul_add(-(2.0 * PI / n as f64).cos(), 4.0) / 9.0
}

fn sqrt3_pass(mesh: &PolyMesh, boundary: Sqrt3Boundary) -> SubdivideResult<PolyMesh> {
    let edges = EdgeTable::build(&mesh.faces)?;

    let boundary_edges = edges.boundary_count();
    if boundary_edges > 0 {
        match boundary {
            Sqrt3Boundary::Reject => {
                return Err(SubdivideError::BoundaryNotSupported {
                    edges: boundary_edges,
                });
            }
            Sqrt3Boundary::Retain => {
                warn!(
                    boundary_edges,
                    "Sqrt3 pass on open mesh; boundary triangles kept unflipped"
                );
            }
        }
    }

    let neighbors = VertexNeighbors::build(mesh.vertex_count(), &mesh.faces);
    let blend = VertexBlend::for_mesh(mesh);
    let centroid_offset = mesh.vertex_count() as u32;

    let mut vertices = Vec::with_capacity(mesh.vertex_count() + mesh.face_count());
    for (vi, vertex) in mesh.vertices.iter().enumerate() {
        let ring = neighbors.of(vi as u32);
        let position = match mean_position(&mesh.vertices, ring) {
            Some(mean) if ring.len() >= 3 => {
                let alpha = sqrt3_alpha(ring.len());
                Point3::from(vertex.position.coords * (1.0 - alpha) + mean * alpha)
            }
            _ => vertex.position,
        };
        vertices.push(blend.moved(vertex, position));
    }

    let centroids: Vec<_> = mesh
        .faces
        .iter()
        .map(|face| blend.centroid(&mesh.vertices, face))
        .collect();

    // Orientation tests use the unsmoothed geometry
    let original = |i: u32| -> Point3<f64> {
        if i < centroid_offset {
            mesh.vertices[i as usize].position
        } else {
            centroids[(i - centroid_offset) as usize].position
        }
    };
    let normals: Vec<Vector3<f64>> = (0..mesh.face_count())
        .map(|fi| {
            mesh.triangle(fi)
                .and_then(|t| t.unit_normal())
                .unwrap_or_else(Vector3::zeros)
        })
        .collect();

    let mut faces: Vec<Face> = Vec::with_capacity(mesh.face_count() * 3);

    // Fan triangles survive only on edges that will not be flipped
    for (fi, face) in mesh.faces.iter().enumerate() {
        let c = centroid_offset + fi as u32;
        for i in 0..3 {
            let a = face[i];
            let b = face[(i + 1) % 3];
            let flipped = edges.edge_between(a, b).is_some_and(|e| e.is_interior());
            if !flipped {
                faces.push(Face::from_slice(&[a, b, c]));
            }
        }
    }

    // Two flip triangles per interior edge, joining the adjacent centroids
    for edge in edges.edges().iter().filter(|e| e.is_interior()) {
        let (v1, v2) = (edge.v0, edge.v1);
        let (f1, f2) = (edge.faces[0], edge.faces[1]);
        let c1 = centroid_offset + f1;
        let c2 = centroid_offset + f2;

        let candidate = Triangle::new(original(c1), original(v1), original(c2));
        let agrees = candidate.faces_along(&normals[f1 as usize])
            || candidate.faces_along(&normals[f2 as usize]);

        if agrees {
            faces.push(Face::from_slice(&[c1, v1, c2]));
            faces.push(Face::from_slice(&[c1, c2, v2]));
        } else {
            faces.push(Face::from_slice(&[c1, c2, v1]));
            faces.push(Face::from_slice(&[c1, v2, c2]));
        }
    }

    vertices.extend(centroids);
    Ok(PolyMesh::from_parts(vertices, faces))
}
