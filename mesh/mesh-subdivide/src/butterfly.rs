//! Butterfly subdivision: interpolating refinement for triangle meshes.
//!
//! Original vertices never move. Each interior edge gets a point from the
//! eight-point butterfly stencil
//!
//! ```text
//!            w1 ------ o1 ------ w2
//!              \      /  \      /
//!               \    /    \    /
//!                 v2 ------ v1
//!               /    \    /    \
//!              /      \  /      \
//!            w3 ------ o2 ------ w4
//! ```
//!
//! `1/2 (v1 + v2) + 1/8 (o1 + o2) - 1/16 (w1 + w2 + w3 + w4)`.
//!
//! Boundary edges, incomplete stencils and stencils whose result strays
//! farther from the chord midpoint than the edge is long all fall back to
//! the midpoint. Every triangle is then split into four as in Loop.

// Algorithm uses many indexing operations
#![allow(clippy::cast_possible_truncation)]

use mesh_topology::{HalfEdge, HalfEdgeMesh};
use mesh_types::{PolyMesh, Vertex};
use nalgebra::Point3;
use tracing::debug;

use crate::blend::VertexBlend;
use crate::error::SubdivideResult;
use crate::loop_subdiv::split_triangles;
use crate::params::{SubdivideParams, SubdivisionMethod};
use crate::scheme::{PassOutput, SubdivisionScheme, grow, validate_input};

/// Butterfly scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Butterfly;

impl SubdivisionScheme for Butterfly {
    fn name(&self) -> &'static str {
        "Butterfly"
    }

    fn method(&self) -> SubdivisionMethod {
        SubdivisionMethod::Butterfly
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
        butterfly_pass(mesh)
    }
}

/// Vertex indices of a complete butterfly stencil around half-edge `v1 -> v2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButterflyStencil {
    /// Edge start.
    pub v1: u32,
    /// Edge end.
    pub v2: u32,
    /// Apex of the face containing the half-edge.
    pub o1: u32,
    /// Apex of the face across the edge.
    pub o2: u32,
    /// Apexes of the faces across the four outer edges of the two triangles.
    pub wings: [u32; 4],
}

impl ButterflyStencil {
    /// Collect the stencil for half-edge `h`.
    ///
    /// Returns `None` when the edge or any outer edge is on the boundary, or
    /// when the eight vertices are not all distinct (low-valence vertices
    /// make wings coincide).
    #[must_use]
    pub fn collect(he: &HalfEdgeMesh, h: u32) -> Option<Self> {
        let half = he.get(h)?;
        let o = half.opposite?;

        // Face of h: v1 -> v2 -> o1; face of o: v2 -> v1 -> o2
        let h_next = half.next;
        let h_prev = he.get(h_next)?.next;
        let o_next = he.get(o)?.next;
        let o_prev = he.get(o_next)?.next;

        let stencil = Self {
            v1: half.from,
            v2: half.to,
            o1: he.apex(h)?,
            o2: he.apex(o)?,
            wings: [
                he.opposite_apex(h_next)?,
                he.opposite_apex(h_prev)?,
                he.opposite_apex(o_next)?,
                he.opposite_apex(o_prev)?,
            ],
        };

        let all = [
            stencil.v1,
            stencil.v2,
            stencil.o1,
            stencil.o2,
            stencil.wings[0],
            stencil.wings[1],
            stencil.wings[2],
            stencil.wings[3],
        ];
        let distinct = all
            .iter()
            .enumerate()
            .all(|(i, v)| !all[..i].contains(v));
        distinct.then_some(stencil)
    }

    /// Apply the butterfly weights.
    #[must_use]
    pub fn evaluate(&self, vertices: &[Vertex]) -> Point3<f64> {
        let p = |i: u32| vertices[i as usize].position.coords;
        let wings = self
            .wings
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, &w| acc + p(w));
        Point3::from(
            (p(self.v1) + p(self.v2)) * 0.5 + (p(self.o1) + p(self.o2)) * 0.125 - wings * 0.0625,
        )
    }
}

/// New point for the edge of `half` (arena id `h`), and whether it fell
/// back to the midpoint.
fn edge_point(
    he: &HalfEdgeMesh,
    h: u32,
    half: &HalfEdge,
    vertices: &[Vertex],
) -> (Point3<f64>, bool) {
    let a = &vertices[half.from as usize].position;
    let b = &vertices[half.to as usize].position;
    let midpoint = nalgebra::center(a, b);

    if half.opposite.is_none() {
        return (midpoint, false);
    }

    let Some(stencil) = ButterflyStencil::collect(he, h) else {
        return (midpoint, true);
    };

    let result = stencil.evaluate(vertices);
    if (result - midpoint).norm() > (b - a).norm() {
        return (midpoint, true);
    }
    (result, false)
}

fn butterfly_pass(mesh: &PolyMesh) -> SubdivideResult<PassOutput> {
    let he = HalfEdgeMesh::build(&mesh.faces)?;
    let blend = VertexBlend::for_mesh(mesh);

    // Originals are copied unchanged (only uv coverage may be dropped)
    let mut vertices: Vec<Vertex> = Vec::with_capacity(mesh.vertex_count() + he.edge_count());
    vertices.extend(mesh.vertices.iter().map(|v| blend.moved(v, v.position)));

    // New vertex index per undirected edge, filled by whichever half-edge
    // reaches the edge first
    let mut edge_vertex: Vec<Option<u32>> = vec![None; he.edge_count()];
    let mut fallbacks = 0usize;

    for (h, half) in he.half_edges().iter().enumerate() {
        let slot = &mut edge_vertex[half.edge as usize];
        if slot.is_some() {
            continue;
        }
        let (position, fell_back) = edge_point(&he, h as u32, half, &mesh.vertices);
        if fell_back {
            fallbacks += 1;
        }
        let a = &mesh.vertices[half.from as usize];
        let b = &mesh.vertices[half.to as usize];
        *slot = Some(vertices.len() as u32);
        vertices.push(blend.on_edge(a, b, position));
    }

    let faces = split_triangles(&mesh.faces, |a, b| {
        he.find(a, b)
            .and_then(|h| he.get(h))
            .and_then(|half| edge_vertex[half.edge as usize])
    });

    if fallbacks > 0 {
        debug!(fallbacks, edges = he.edge_count(), "Butterfly stencil fallbacks");
    }

    Ok(PassOutput {
        mesh: PolyMesh::from_parts(vertices, faces),
        stencil_fallbacks: fallbacks,
    })
}
