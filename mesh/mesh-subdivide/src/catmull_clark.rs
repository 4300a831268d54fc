//! Catmull-Clark subdivision for arbitrary polygon meshes.
//!
//! Each pass inserts one point per face and one per edge, moves every
//! original vertex, and replaces each k-gon with k quads. The output vertex
//! array is laid out as `[vertex points][edge points][face points]`.

// Algorithm uses many indexing operations
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use mesh_topology::EdgeTable;
use mesh_types::{Face, PolyMesh, Vertex};
use nalgebra::{Point3, Vector3};
use tracing::trace;

use crate::blend::VertexBlend;
use crate::error::SubdivideResult;
use crate::params::{SubdivideParams, SubdivisionMethod};
use crate::scheme::{PassOutput, SubdivisionScheme, grow, validate_input};

/// Catmull-Clark scheme.
///
/// # Example
///
/// ```
/// use mesh_subdivide::{CatmullClark, SubdivideParams, SubdivisionScheme};
/// use mesh_types::unit_cube;
///
/// let pass = CatmullClark.subdivide_once(&unit_cube(), &SubdivideParams::default())?;
/// assert_eq!(pass.mesh.vertex_count(), 26);
/// assert_eq!(pass.mesh.face_count(), 24);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatmullClark;

impl SubdivisionScheme for CatmullClark {
    fn name(&self) -> &'static str {
        "Catmull-Clark"
    }

    fn method(&self) -> SubdivisionMethod {
        SubdivisionMethod::CatmullClark
    }

    fn requires_triangles(&self) -> bool {
        false
    }

    /// The first pass turns every k-gon into k quads; later passes quadruple.
    fn projected_faces(&self, mesh: &PolyMesh, iterations: u32) -> usize {
        if iterations == 0 {
            return mesh.face_count();
        }
        grow(mesh.face_sides(), 4, iterations - 1)
    }

    fn subdivide_once(
        &self,
        mesh: &PolyMesh,
        _params: &SubdivideParams,
    ) -> SubdivideResult<PassOutput> {
        validate_input(mesh, self)?;
        catmull_clark_pass(mesh).map(PassOutput::from)
    }
}

/// One Catmull-Clark pass over a validated mesh.
fn catmull_clark_pass(mesh: &PolyMesh) -> SubdivideResult<PolyMesh> {
    let edges = EdgeTable::build(&mesh.faces)?;
    let blend = VertexBlend::for_mesh(mesh);

    let vertex_count = mesh.vertex_count();
    let edge_offset = vertex_count as u32;
    let face_offset = edge_offset + edges.len() as u32;

    // Face points: mean of the corners
    let face_points: Vec<Vertex> = mesh
        .faces
        .iter()
        .map(|face| blend.centroid(&mesh.vertices, face))
        .collect();

    // Edge points: midpoint, pulled halfway toward the adjacent face points
    // when the edge is shared
    let edge_points: Vec<Vertex> = edges
        .edges()
        .iter()
        .map(|edge| {
            let a = &mesh.vertices[edge.v0 as usize];
            let b = &mesh.vertices[edge.v1 as usize];
            let mid = nalgebra::center(&a.position, &b.position);
            if edge.is_interior() {
                let f0 = &face_points[edge.faces[0] as usize].position;
                let f1 = &face_points[edge.faces[1] as usize].position;
                let face_mid = nalgebra::center(f0, f1);
                blend.on_edge(a, b, nalgebra::center(&mid, &face_mid))
            } else {
                blend.on_edge(a, b, mid)
            }
        })
        .collect();

    // Per-vertex sums of adjacent face points and connected edge points
    let mut face_sum = vec![Vector3::zeros(); vertex_count];
    let mut face_n = vec![0usize; vertex_count];
    for (face, point) in mesh.faces.iter().zip(&face_points) {
        for &v in face {
            face_sum[v as usize] += point.position.coords;
            face_n[v as usize] += 1;
        }
    }

    let mut edge_sum = vec![Vector3::zeros(); vertex_count];
    let mut edge_n = vec![0usize; vertex_count];
    for (edge, point) in edges.edges().iter().zip(&edge_points) {
        for v in [edge.v0, edge.v1] {
            edge_sum[v as usize] += point.position.coords;
            edge_n[v as usize] += 1;
        }
    }

    let mut vertices = Vec::with_capacity(vertex_count + edge_points.len() + face_points.len());
    for (vi, vertex) in mesh.vertices.iter().enumerate() {
        let position = vertex_point(
            &vertex.position,
            face_n[vi],
            &face_sum[vi],
            edge_n[vi],
            &edge_sum[vi],
        );
        vertices.push(blend.moved(vertex, position));
    }
    vertices.extend(edge_points);
    vertices.extend(face_points);

    // Every corner of every face becomes a quad:
    // corner, following edge point, face point, preceding edge point
    let mut faces: Vec<Face> = Vec::with_capacity(mesh.face_sides());
    for (fi, face) in mesh.faces.iter().enumerate() {
        let k = face.len();
        let face_point = face_offset + fi as u32;
        for i in 0..k {
            let corner = face[i];
            let next = face[(i + 1) % k];
            let prev = face[(i + k - 1) % k];
            let (Some(e_next), Some(e_prev)) = (edges.find(corner, next), edges.find(prev, corner))
            else {
                continue;
            };
            faces.push(Face::from_slice(&[
                corner,
                edge_offset + e_next,
                face_point,
                edge_offset + e_prev,
            ]));
        }
    }

    trace!(
        vertex_points = vertex_count,
        edge_points = edges.len(),
        face_points = mesh.face_count(),
        "Catmull-Clark pass"
    );

    Ok(PolyMesh::from_parts(vertices, faces))
}

/// `(Q + 2R + (n - 3) v) / n`, with `n` the number of adjacent faces.
///
/// `Q` is the mean of adjacent face points and `R` the mean of connected edge
/// points. A vertex with no adjacent faces stays where it is.
fn vertex_point(
    v: &Point3<f64>,
    face_n: usize,
    face_sum: &Vector3<f64>,
    edge_n: usize,
    edge_sum: &Vector3<f64>,
) -> Point3<f64> {
    if face_n == 0 || edge_n == 0 {
        return *v;
    }
    let n = face_n as f64;
    let q = face_sum / n;
    let r = edge_sum / edge_n as f64;
    Point3::from((q + r * 2.0 + v.coords * (n - 3.0)) / n)
}
