//! Property-based tests for adjacency construction.
//!
//! Run with: cargo test -p mesh-topology -- proptest

use mesh_topology::{analyze, validate_faces, EdgeTable, HalfEdgeMesh, VertexNeighbors};
use mesh_types::{Face, PolyMesh, Vertex};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Random triangle soup over `vertex_count` vertices. Faces may be
/// degenerate, repeated, or non-manifold.
fn arb_faces(vertex_count: u32, max_faces: usize) -> impl Strategy<Value = Vec<Face>> {
    let tri = prop::array::uniform3(0..vertex_count).prop_map(|t| Face::from_slice(&t));
    prop::collection::vec(tri, 0..=max_faces)
}

fn mesh_from(vertex_count: u32, faces: Vec<Face>) -> PolyMesh {
    let vertices = (0..vertex_count)
        .map(|i| Vertex::from_coords(f64::from(i), 0.0, 0.0))
        .collect();
    PolyMesh::from_parts(vertices, faces)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Analysis never panics, whatever the input.
    #[test]
    fn analyze_never_panics(faces in arb_faces(12, 40)) {
        let report = analyze(&mesh_from(12, faces));
        prop_assert!(report.isolated_vertex_count <= report.vertex_count);
    }

    /// Face sides split into boundary and interior edge uses.
    #[test]
    fn edge_uses_match_face_sides(faces in arb_faces(10, 30)) {
        prop_assume!(validate_faces(10, &faces).is_ok());
        if let Ok(table) = EdgeTable::build(&faces) {
            let sides: usize = faces.iter().map(|f| f.len()).sum();
            let uses: usize = table.edges().iter().map(|e| e.faces.len()).sum();
            prop_assert_eq!(sides, uses);

            let report = analyze(&mesh_from(10, faces));
            prop_assert_eq!(report.edge_count, table.len());
            prop_assert_eq!(report.boundary_edge_count, table.boundary_count());
        }
    }

    /// A consistent half-edge build implies a manifold edge table with the
    /// same edge count, and symmetric opposite links.
    #[test]
    fn half_edges_agree_with_edge_table(faces in arb_faces(8, 20)) {
        prop_assume!(validate_faces(8, &faces).is_ok());
        if let Ok(he) = HalfEdgeMesh::build(&faces) {
            let table = EdgeTable::build(&faces);
            prop_assert!(table.is_ok());
            if let Ok(table) = table {
                prop_assert_eq!(he.edge_count(), table.len());
            }

            for (h, half) in he.half_edges().iter().enumerate() {
                if let Some(o) = half.opposite {
                    let back = he.get(o);
                    prop_assert!(back.is_some());
                    if let Some(back) = back {
                        prop_assert_eq!(back.opposite, Some(u32::try_from(h).unwrap_or(u32::MAX)));
                        prop_assert_eq!(back.edge, half.edge);
                    }
                }
            }
        }
    }

    /// Neighborhood is a symmetric relation.
    #[test]
    fn neighbors_are_symmetric(faces in arb_faces(10, 30)) {
        let neighbors = VertexNeighbors::build(10, &faces);
        for v in 0..10u32 {
            for &n in neighbors.of(v) {
                prop_assert!(neighbors.of(n).contains(&v));
            }
        }
    }
}
