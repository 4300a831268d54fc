//! Seed meshes.
//!
//! Small closed solids and an open grid, wound CCW when viewed from outside.

use crate::{Face, PolyMesh, Vertex};
use nalgebra::Point2;

/// Unit cube centered at the origin, as 6 quads.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 6);
/// ```
#[must_use]
pub fn unit_cube() -> PolyMesh {
    let vertices = vec![
        Vertex::from_coords(-0.5, -0.5, 0.5),
        Vertex::from_coords(0.5, -0.5, 0.5),
        Vertex::from_coords(0.5, 0.5, 0.5),
        Vertex::from_coords(-0.5, 0.5, 0.5),
        Vertex::from_coords(-0.5, -0.5, -0.5),
        Vertex::from_coords(-0.5, 0.5, -0.5),
        Vertex::from_coords(0.5, 0.5, -0.5),
        Vertex::from_coords(0.5, -0.5, -0.5),
    ];

    let quads: [[u32; 4]; 6] = [
        [0, 1, 2, 3], // +Z
        [4, 5, 6, 7], // -Z
        [0, 4, 7, 1], // -Y
        [2, 6, 5, 3], // +Y
        [0, 3, 5, 4], // -X
        [1, 7, 6, 2], // +X
    ];
    let faces = quads.iter().map(|f| Face::from_slice(f)).collect();

    PolyMesh::from_parts(vertices, faces)
}

/// Unit cube with each quad split into two triangles (12 faces).
#[must_use]
pub fn triangulated_cube() -> PolyMesh {
    unit_cube().triangulate()
}

/// Regular tetrahedron inscribed in the cube `[-1, 1]^3`.
#[must_use]
pub fn tetrahedron() -> PolyMesh {
    let vertices = vec![
        Vertex::from_coords(1.0, 1.0, 1.0),
        Vertex::from_coords(1.0, -1.0, -1.0),
        Vertex::from_coords(-1.0, 1.0, -1.0),
        Vertex::from_coords(-1.0, -1.0, 1.0),
    ];
    PolyMesh::from_triangles(vertices, &[[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]])
}

/// Regular octahedron with vertices on the unit axes.
#[must_use]
pub fn octahedron() -> PolyMesh {
    let vertices = vec![
        Vertex::from_coords(1.0, 0.0, 0.0),
        Vertex::from_coords(-1.0, 0.0, 0.0),
        Vertex::from_coords(0.0, 1.0, 0.0),
        Vertex::from_coords(0.0, -1.0, 0.0),
        Vertex::from_coords(0.0, 0.0, 1.0),
        Vertex::from_coords(0.0, 0.0, -1.0),
    ];
    PolyMesh::from_triangles(
        vertices,
        &[
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ],
    )
}

/// Open planar grid of `columns x rows` quads spanning `[0, 1]^2` at `z = 0`.
///
/// Every vertex carries a texture coordinate equal to its `(x, y)`, so the
/// grid doubles as a seed for attribute propagation. Faces face `+Z`.
///
/// # Example
///
/// ```
/// use mesh_types::quad_grid;
///
/// let grid = quad_grid(3, 2);
/// assert_eq!(grid.vertex_count(), 12);
/// assert_eq!(grid.face_count(), 6);
/// assert!(grid.has_uvs());
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn quad_grid(columns: u32, rows: u32) -> PolyMesh {
    let columns = columns.max(1);
    let rows = rows.max(1);
    let stride = columns + 1;

    let mut mesh = PolyMesh::with_capacity(
        (stride * (rows + 1)) as usize,
        (columns * rows) as usize,
    );

    for j in 0..=rows {
        for i in 0..=columns {
            let x = f64::from(i) / f64::from(columns);
            let y = f64::from(j) / f64::from(rows);
            mesh.vertices
                .push(Vertex::from_coords(x, y, 0.0).with_uv(Point2::new(x, y)));
        }
    }

    for j in 0..rows {
        for i in 0..columns {
            let v = |i: u32, j: u32| j * stride + i;
            mesh.faces.push(Face::from_slice(&[
                v(i, j),
                v(i + 1, j),
                v(i + 1, j + 1),
                v(i, j + 1),
            ]));
        }
    }

    mesh
}
