//! Loop subdivision for triangle meshes.
//!
//! Every edge gets a new point from the 3/8, 3/8, 1/8, 1/8 stencil (plain
//! midpoint on the boundary), every original vertex is pulled toward its
//! neighbors with Loop's valence-dependent weight, and every triangle is
//! split into four.

// Algorithm uses many indexing operations
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use mesh_topology::{EdgeTable, VertexNeighbors};
use mesh_types::{Face, PolyMesh};
use nalgebra::Point3;
use std::f64::consts::PI;

use crate::blend::{VertexBlend, mean_position};
use crate::error::SubdivideResult;
use crate::params::{SubdivideParams, SubdivisionMethod};
use crate::scheme::{PassOutput, SubdivisionScheme, grow, validate_input};

/// Loop scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopScheme;

impl SubdivisionScheme for LoopScheme {
    fn name(&self) -> &'static str {
        "Loop"
    }

    fn method(&self) -> SubdivisionMethod {
        SubdivisionMethod::Loop
    }

    fn requires_triangles(&self) -> bool {
        true
    }

    fn projected_faces(&self, mesh: &PolyMesh, iterations: u32) -> usize {
        grow(mesh.face_count(), 4, iterations)
    }

    fn subdivide_once(
        &self,
        mesh: &PolyMesh,
        _params: &SubdivideParams,
    ) -> SubdivideResult<PassOutput> {
        validate_input(mesh, self)?;
        loop_pass(mesh).map(PassOutput::from)
    }
}

/// Loop's vertex weight for valence `n`.
///
/// `3/16` for `n == 3`, otherwise `(5/8 - (3/8 + cos(2π/n) / 4)²) / n`.
#[must_use]
pub fn loop_alpha(n: usize) -> f64 {
    if n == 3 {
        return 3.0 / 16.0;
    }
    let n = n as f64;
    let term = 0.25f64.mul_add((2.0 * PI / n).cos(), 3.0 / 8.0);
    term.mul_add(-term, 5.0 / 8.0) / n
}

fn loop_pass(mesh: &PolyMesh) -> SubdivideResult<PolyMesh> {
    let edges = EdgeTable::build(&mesh.faces)?;
    let neighbors = VertexNeighbors::build(mesh.vertex_count(), &mesh.faces);
    let blend = VertexBlend::for_mesh(mesh);

    let edge_offset = mesh.vertex_count() as u32;
    let mut vertices = Vec::with_capacity(mesh.vertex_count() + edges.len());

    // Even vertices: (1 - n alpha) v + alpha * sum(neighbors)
    for (vi, vertex) in mesh.vertices.iter().enumerate() {
        let ring = neighbors.of(vi as u32);
        let position = match mean_position(&mesh.vertices, ring) {
            Some(mean) => {
                let n = ring.len() as f64;
                let alpha = loop_alpha(ring.len());
                // alpha * sum == alpha * n * mean
                Point3::from(
                    vertex.position.coords * n.mul_add(-alpha, 1.0) + mean * (alpha * n),
                )
            }
            None => vertex.position,
        };
        vertices.push(blend.moved(vertex, position));
    }

    // Odd vertices, one per edge in edge-table order
    for (ei, edge) in edges.edges().iter().enumerate() {
        let a = &mesh.vertices[edge.v0 as usize];
        let b = &mesh.vertices[edge.v1 as usize];
        let point = match edges.opposite_vertices(ei as u32, &mesh.faces) {
            Some((left, right)) => {
                let l = &mesh.vertices[left as usize].position;
                let r = &mesh.vertices[right as usize].position;
                let p = (a.position.coords + b.position.coords) * (3.0 / 8.0)
                    + (l.coords + r.coords) * (1.0 / 8.0);
                blend.on_edge(a, b, Point3::from(p))
            }
            None => blend.midpoint(a, b),
        };
        vertices.push(point);
    }

    let faces = split_triangles(&mesh.faces, |a, b| {
        edges.find(a, b).map(|e| edge_offset + e)
    });

    Ok(PolyMesh::from_parts(vertices, faces))
}

/// 1-to-4 split shared by Loop and Butterfly.
///
/// For triangle `(v1, v2, v3)` with `e1` on the edge opposite `v1`, `e2`
/// opposite `v2` and `e3` opposite `v3`, emits `(v1, e3, e2)`,
/// `(v2, e1, e3)`, `(v3, e2, e1)` and `(e1, e2, e3)`. `edge_point(a, b)`
/// returns the new vertex index on edge `(a, b)`.
pub(crate) fn split_triangles(
    faces: &[Face],
    mut edge_point: impl FnMut(u32, u32) -> Option<u32>,
) -> Vec<Face> {
    let mut out = Vec::with_capacity(faces.len() * 4);
    for face in faces {
        let (v1, v2, v3) = (face[0], face[1], face[2]);
        let (Some(e1), Some(e2), Some(e3)) =
            (edge_point(v2, v3), edge_point(v3, v1), edge_point(v1, v2))
        else {
            continue;
        };
        out.push(Face::from_slice(&[v1, e3, e2]));
        out.push(Face::from_slice(&[v2, e1, e3]));
        out.push(Face::from_slice(&[v3, e2, e1]));
        out.push(Face::from_slice(&[e1, e2, e3]));
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{Vertex, octahedron, triangulated_cube, unit_cube};

    fn run(mesh: &PolyMesh) -> PolyMesh {
        LoopScheme
            .subdivide_once(mesh, &SubdivideParams::default())
            .unwrap()
            .mesh
    }

    fn two_triangles() -> PolyMesh {
        PolyMesh::from_triangles(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.5, 1.0, 0.0),
                Vertex::from_coords(1.5, 1.0, 0.0),
            ],
            &[[0, 1, 2], [1, 3, 2]],
        )
    }

    #[test]
    fn test_loop_alpha() {
        assert_relative_eq!(loop_alpha(3), 3.0 / 16.0);
        // The general formula agrees with the special case at n = 3
        let n = 3.0f64;
        let term = 3.0 / 8.0 + 0.25 * (2.0 * PI / n).cos();
        assert_relative_eq!((5.0 / 8.0 - term * term) / n, 3.0 / 16.0, epsilon = 1e-12);
        // Regular valence 6: 1/16
        assert_relative_eq!(loop_alpha(6), 1.0 / 16.0, epsilon = 1e-12);
    }

    #[test]
    fn octahedron_counts() {
        let out = run(&octahedron());
        // V + E = 6 + 12, 4F = 32
        assert_eq!(out.vertex_count(), 18);
        assert_eq!(out.face_count(), 32);
    }

    #[test]
    fn interior_edge_uses_full_stencil() {
        let out = run(&two_triangles());
        // Edge (1, 2) is the second edge in first-appearance order
        let p = out.vertices[4 + 1].position;
        // 3/8 ((1,0) + (0.5,1)) + 1/8 ((0,0) + (1.5,1))
        assert_relative_eq!(p, Point3::new(0.75, 0.5, 0.0), epsilon = 1e-12);

        // Boundary edge (0, 1) is a plain midpoint
        assert_relative_eq!(out.vertices[4].position, Point3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn regular_vertex_rule() {
        let out = run(&octahedron());
        // Valence 4 at (1, 0, 0); neighbors sum to zero
        let alpha = loop_alpha(4);
        let expected = 1.0 - 4.0 * alpha;
        assert_relative_eq!(out.vertices[0].position.x, expected, epsilon = 1e-12);
        assert_relative_eq!(out.vertices[0].position.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn split_pattern() {
        let out = run(&PolyMesh::from_triangles(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
            ],
            &[[0, 1, 2]],
        ));
        // Edges in order: (0,1) -> 3, (1,2) -> 4, (0,2) -> 5
        // e1 = 4, e2 = 5, e3 = 3
        let faces: Vec<Vec<u32>> = out.faces.iter().map(|f| f.to_vec()).collect();
        assert_eq!(
            faces,
            vec![vec![0, 3, 5], vec![1, 4, 3], vec![2, 5, 4], vec![4, 5, 3]]
        );
    }

    #[test]
    fn closed_mesh_keeps_outward_winding() {
        let out = run(&octahedron());
        for (fi, face) in out.faces.iter().enumerate() {
            let centroid = (out.vertices[face[0] as usize].position.coords
                + out.vertices[face[1] as usize].position.coords
                + out.vertices[face[2] as usize].position.coords)
                / 3.0;
            assert!(out.face_normal(fi).unwrap().dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn rejects_quads() {
        let err = LoopScheme
            .subdivide_once(&unit_cube(), &SubdivideParams::default())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::SubdivideError::NonTriangularFace { .. }
        ));
    }

    #[test]
    fn cube_corners_pulled_inward() {
        let cube = triangulated_cube();
        let out = run(&cube);
        for (before, after) in cube.vertices.iter().zip(&out.vertices) {
            assert!(after.position.coords.norm() < before.position.coords.norm());
        }
    }
}
