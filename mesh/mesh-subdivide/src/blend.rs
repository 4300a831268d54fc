//! Construction of new vertices from existing ones.

// Face arity and valence are tiny compared to f64 precision
#![allow(clippy::cast_precision_loss)]

use mesh_types::{PolyMesh, Vertex};
use nalgebra::{Point2, Point3, Vector2, Vector3};

/// Builds new vertices for one pass, carrying texture coordinates only when
/// every input vertex has one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VertexBlend {
    with_uv: bool,
}

impl VertexBlend {
    pub(crate) fn for_mesh(mesh: &PolyMesh) -> Self {
        Self {
            with_uv: mesh.has_uvs(),
        }
    }

    /// Original vertex moved to `position`, texture coordinate unchanged.
    pub(crate) fn moved(self, vertex: &Vertex, position: Point3<f64>) -> Vertex {
        Vertex {
            position,
            uv: if self.with_uv { vertex.uv } else { None },
        }
    }

    /// Edge point with an explicit position and the midpoint texture coordinate.
    pub(crate) fn on_edge(self, a: &Vertex, b: &Vertex, position: Point3<f64>) -> Vertex {
        let uv = if self.with_uv {
            a.uv.zip(b.uv).map(|(ua, ub)| nalgebra::center(&ua, &ub))
        } else {
            None
        };
        Vertex { position, uv }
    }

    /// Midpoint of two vertices.
    pub(crate) fn midpoint(self, a: &Vertex, b: &Vertex) -> Vertex {
        self.on_edge(a, b, nalgebra::center(&a.position, &b.position))
    }

    /// Mean of the listed vertices.
    pub(crate) fn centroid(self, vertices: &[Vertex], corners: &[u32]) -> Vertex {
        let n = corners.len().max(1) as f64;
        let mut sum = Vector3::zeros();
        let mut uv_sum = Vector2::zeros();
        for &c in corners {
            let v = &vertices[c as usize];
            sum += v.position.coords;
            if let Some(uv) = v.uv {
                uv_sum += uv.coords;
            }
        }
        Vertex {
            position: Point3::from(sum / n),
            uv: self.with_uv.then(|| Point2::from(uv_sum / n)),
        }
    }
}

/// Mean position of the listed vertices, or `None` for an empty list.
pub(crate) fn mean_position(vertices: &[Vertex], indices: &[u32]) -> Option<Vector3<f64>> {
    if indices.is_empty() {
        return None;
    }
    let sum: Vector3<f64> = indices
        .iter()
        .map(|&i| vertices[i as usize].position.coords)
        .sum();
    Some(sum / indices.len() as f64)
}
