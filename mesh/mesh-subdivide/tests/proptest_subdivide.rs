//! Property-based tests for the subdivision schemes.
//!
//! Run with: cargo test -p mesh-subdivide -- proptest

use mesh_subdivide::{
    ChaikinParams, SubdivideError, SubdivideParams, SubdivisionMethod, subdivide_mesh,
    subdivide_polyline,
};
use mesh_topology::{EdgeTable, HalfEdgeMesh, analyze};
use mesh_types::{PolyMesh, Point3, Vector3, octahedron, tetrahedron, triangulated_cube};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A closed triangle seed with every vertex nudged by a small random offset.
fn arb_closed_mesh() -> impl Strategy<Value = PolyMesh> {
    let offsets = prop::collection::vec(prop::array::uniform3(-0.05f64..0.05), 8);
    (0usize..3, offsets).prop_map(|(which, offsets)| {
        let mut mesh = match which {
            0 => tetrahedron(),
            1 => octahedron(),
            _ => triangulated_cube(),
        };
        for (vertex, d) in mesh.vertices.iter_mut().zip(&offsets) {
            vertex.position += Vector3::new(d[0], d[1], d[2]);
        }
        mesh
    })
}

fn arb_polyline() -> impl Strategy<Value = Vec<Point3<f64>>> {
    let point = prop::array::uniform3(-10.0f64..10.0).prop_map(|p| Point3::new(p[0], p[1], p[2]));
    prop::collection::vec(point, 2..20)
}

fn arb_chaikin() -> impl Strategy<Value = ChaikinParams> {
    (0.0f64..=1.0, 0.0f64..=1.0, 0u32..4, any::<bool>(), any::<bool>()).prop_map(
        |(u, v, iterations, retain, closed)| {
            ChaikinParams::new(u, v)
                .with_iterations(iterations)
                .with_retain_endpoints(retain)
                .with_closed(closed)
        },
    )
}

fn run(mesh: &PolyMesh, method: SubdivisionMethod) -> Result<PolyMesh, SubdivideError> {
    subdivide_mesh(mesh, &SubdivideParams::default().with_method(method)).map(|r| r.mesh)
}

// =============================================================================
// Mesh Properties
// =============================================================================

proptest! {
    /// Vertex and face counts depend only on topology, not on positions.
    #[test]
    fn growth_laws_hold(mesh in arb_closed_mesh()) {
        let v = mesh.vertex_count();
        let f = mesh.face_count();
        let e = EdgeTable::build(&mesh.faces).map(|t| t.len()).unwrap_or(0);
        prop_assert!(e > 0);

        let cc = run(&mesh, SubdivisionMethod::CatmullClark);
        prop_assert!(cc.is_ok());
        if let Ok(out) = cc {
            prop_assert_eq!(out.vertex_count(), v + e + f);
            prop_assert_eq!(out.face_count(), 3 * f);
        }

        for method in [SubdivisionMethod::Loop, SubdivisionMethod::Butterfly] {
            let out = run(&mesh, method);
            prop_assert!(out.is_ok());
            if let Ok(out) = out {
                prop_assert_eq!(out.vertex_count(), v + e);
                prop_assert_eq!(out.face_count(), 4 * f);
            }
        }

        let sqrt3 = run(&mesh, SubdivisionMethod::Kobbelt);
        prop_assert!(sqrt3.is_ok());
        if let Ok(out) = sqrt3 {
            prop_assert_eq!(out.vertex_count(), v + f);
            prop_assert_eq!(out.face_count(), 3 * f);
        }
    }

    /// Butterfly never moves an original vertex.
    #[test]
    fn butterfly_interpolates(mesh in arb_closed_mesh()) {
        if let Ok(out) = run(&mesh, SubdivisionMethod::Butterfly) {
            for (before, after) in mesh.vertices.iter().zip(&out.vertices) {
                prop_assert_eq!(before.position, after.position);
            }
        }
    }

    /// Closed input stays closed and manifold, with finite positions.
    #[test]
    fn closed_stays_closed(mesh in arb_closed_mesh()) {
        for method in SubdivisionMethod::ALL {
            if let Ok(out) = run(&mesh, method) {
                let report = analyze(&out);
                prop_assert!(report.is_closed());
                prop_assert_eq!(report.non_manifold_edge_count, 0);
                prop_assert!(out.positions().all(|p| p.coords.iter().all(|c| c.is_finite())));
            }
        }
    }

    /// Butterfly edge points never stray farther from their chord midpoint
    /// than the chord is long.
    #[test]
    fn butterfly_points_stay_near_their_edge(mesh in arb_closed_mesh()) {
        let he = HalfEdgeMesh::build(&mesh.faces);
        prop_assume!(he.is_ok());
        if let (Ok(he), Ok(out)) = (he, run(&mesh, SubdivisionMethod::Butterfly)) {
            let v = mesh.vertex_count();
            for half in he.half_edges() {
                let a = mesh.vertices[half.from as usize].position;
                let b = mesh.vertices[half.to as usize].position;
                // New vertices follow edge ids
                let p = out.vertices[v + half.edge as usize].position;
                prop_assert!((p - nalgebra::center(&a, &b)).norm() <= (b - a).norm() + 1e-12);
            }
        }
    }
}

// =============================================================================
// Chaikin Properties
// =============================================================================

proptest! {
    /// Output length follows the per-pass rule.
    #[test]
    fn chaikin_length(points in arb_polyline(), params in arb_chaikin()) {
        let out = subdivide_polyline(&points, &params);
        prop_assert!(out.is_ok());
        if let Ok(out) = out {
            prop_assert_eq!(out.len(), params.output_len(points.len()));
        }
    }

    /// Every refined point is a convex combination of input points, so it
    /// stays inside their bounding box.
    #[test]
    fn chaikin_stays_in_hull(points in arb_polyline(), params in arb_chaikin()) {
        let bounds = mesh_types::Aabb::from_points(points.iter());
        if let Ok(out) = subdivide_polyline(&points, &params) {
            for p in &out {
                for axis in 0..3 {
                    prop_assert!(p[axis] >= bounds.min[axis] - 1e-9);
                    prop_assert!(p[axis] <= bounds.max[axis] + 1e-9);
                }
            }
        }
    }

    /// Blend parameters outside [0, 1] are rejected.
    #[test]
    fn chaikin_rejects_bad_blend(points in arb_polyline(), u in 1.001f64..10.0) {
        let params = ChaikinParams::new(u, 0.5);
        prop_assert!(
            matches!(
                subdivide_polyline(&points, &params),
                Err(SubdivideError::InvalidBlend { .. })
            ),
            "blend u = {} was accepted",
            u
        );
    }
}
