//! Indexed polygon mesh.

use crate::{Aabb, Triangle, Vertex};
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygon face as an ordered, cyclic list of vertex indices.
///
/// Triangles and quads are stored inline; larger polygons spill to the heap.
pub type Face = SmallVec<[u32; 4]>;

/// An indexed polygon mesh.
///
/// Faces may have any number of sides (at least 3). Triangle-only schemes
/// check [`PolyMesh::is_triangle_mesh`] before running.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Vertex>` - positions and optional texture coordinates
/// - `faces`: `Vec<Face>` - polygon faces as vertex indices
///
/// # Example
///
/// ```
/// use mesh_types::{PolyMesh, Point3};
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mesh = PolyMesh::from_positions(positions, &[vec![0u32, 1, 2]]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert!(mesh.is_triangle_mesh());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Faces as indices into the vertex array, CCW when viewed from outside.
    pub faces: Vec<Face>,
}

impl PolyMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from bare positions and index lists.
    ///
    /// Index lists are copied as given; nothing is validated here.
    #[must_use]
    pub fn from_positions<F: AsRef<[u32]>>(positions: Vec<Point3<f64>>, faces: &[F]) -> Self {
        Self {
            vertices: positions.into_iter().map(Vertex::new).collect(),
            faces: faces.iter().map(|f| Face::from_slice(f.as_ref())).collect(),
        }
    }

    /// Create a mesh from fixed-size triangle faces.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{PolyMesh, Vertex};
    ///
    /// let vertices = vec![
    ///     Vertex::from_coords(0.0, 0.0, 0.0),
    ///     Vertex::from_coords(1.0, 0.0, 0.0),
    ///     Vertex::from_coords(0.0, 1.0, 0.0),
    /// ];
    /// let mesh = PolyMesh::from_triangles(vertices, &[[0, 1, 2]]);
    /// assert_eq!(mesh.face_sides(), 3);
    /// ```
    #[must_use]
    pub fn from_triangles(vertices: Vec<Vertex>, triangles: &[[u32; 3]]) -> Self {
        Self {
            vertices,
            faces: triangles.iter().map(|t| Face::from_slice(t)).collect(),
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// A mesh is empty when it has no vertices or no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Sum of the side counts of all faces.
    ///
    /// This is the face count produced by one Catmull-Clark pass.
    #[must_use]
    pub fn face_sides(&self) -> usize {
        self.faces.iter().map(|f| f.len()).sum()
    }

    /// Check that every face is a triangle.
    #[must_use]
    pub fn is_triangle_mesh(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }

    /// Check that every vertex carries a texture coordinate.
    #[must_use]
    pub fn has_uvs(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.iter().all(|v| v.uv.is_some())
    }

    /// Iterate over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.vertices.iter().map(|v| &v.position)
    }

    /// Get a triangle face with resolved positions.
    ///
    /// Returns `None` if the face is out of range, is not a triangle, or
    /// references a missing vertex.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let face = self.faces.get(face_index)?;
        if face.len() != 3 {
            return None;
        }
        let p = |i: u32| self.vertices.get(i as usize).map(|v| v.position);
        Some(Triangle::new(p(face[0])?, p(face[1])?, p(face[2])?))
    }

    /// Compute the (unnormalized) normal of a face with Newell's method.
    ///
    /// Works for any planar or mildly non-planar polygon; for a triangle it
    /// equals the cross-product normal. Returns `None` for an out-of-range
    /// face or vertex index.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::unit_cube;
    ///
    /// let cube = unit_cube();
    /// // Face 0 is the +Z side.
    /// let n = cube.face_normal(0).unwrap();
    /// assert!(n.z > 0.0);
    /// ```
    #[must_use]
    pub fn face_normal(&self, face_index: usize) -> Option<Vector3<f64>> {
        let face = self.faces.get(face_index)?;
        let mut normal = Vector3::zeros();
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            let pa = self.vertices.get(a as usize)?.position;
            let pb = self.vertices.get(b as usize)?.position;
            normal.x += (pa.y - pb.y) * (pa.z + pb.z);
            normal.y += (pa.z - pb.z) * (pa.x + pb.x);
            normal.z += (pa.x - pb.x) * (pa.y + pb.y);
        }
        Some(normal)
    }

    /// Compute the axis-aligned bounding box of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions())
    }

    /// Fan-triangulate every polygon face.
    ///
    /// A k-gon `[a, b, c, d, ...]` becomes `[a, b, c], [a, c, d], ...`,
    /// keeping the winding. Vertices are untouched. Faces with fewer than 3
    /// indices are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::unit_cube;
    ///
    /// let tris = unit_cube().triangulate();
    /// assert_eq!(tris.face_count(), 12);
    /// assert!(tris.is_triangle_mesh());
    /// ```
    #[must_use]
    pub fn triangulate(&self) -> Self {
        let capacity = self
            .faces
            .iter()
            .map(|f| f.len().saturating_sub(2))
            .sum();
        let mut faces = Vec::with_capacity(capacity);

        for face in &self.faces {
            for i in 1..face.len().saturating_sub(1) {
                faces.push(Face::from_slice(&[face[0], face[i], face[i + 1]]));
            }
        }

        Self {
            vertices: self.vertices.clone(),
            faces,
        }
    }

    /// Merge vertices closer than `tolerance` and compact the vertex array.
    ///
    /// Turns a triangle soup (one vertex per face corner) into a connected
    /// mesh. Surviving vertices keep their relative order; the first vertex
    /// of each cluster is kept, including its texture coordinate. Faces that
    /// collapse (a repeated index after remapping) are removed, and so are
    /// faces that reference a vertex past the end of the vertex list.
    ///
    /// Returns the number of vertices merged away.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{PolyMesh, Point3};
    ///
    /// // Two triangles with duplicated shared corners.
    /// let positions = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(1.0, 1.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ];
    /// let mut mesh = PolyMesh::from_positions(positions, &[[0u32, 1, 2], [3, 4, 5]]);
    ///
    /// assert_eq!(mesh.weld_vertices(1e-9), 2);
    /// assert_eq!(mesh.vertex_count(), 4);
    /// assert_eq!(mesh.faces[1].as_slice(), &[1, 3, 2]);
    /// ```
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: indices are u32, so vertex counts > 4B are unsupported
    pub fn weld_vertices(&mut self, tolerance: f64) -> usize {
        let vertex_count = self.vertices.len();
        self.faces
            .retain(|face| face.iter().all(|&index| (index as usize) < vertex_count));

        if self.vertices.is_empty() {
            return 0;
        }

        let cell_size = (tolerance * 2.0).max(f64::MIN_POSITIVE);
        let mut spatial_hash: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
        for (idx, vertex) in self.vertices.iter().enumerate() {
            spatial_hash
                .entry(pos_to_cell(&vertex.position, cell_size))
                .or_default()
                .push(idx as u32);
        }

        let mut remap: Vec<u32> = (0..self.vertices.len() as u32).collect();
        let mut merged = 0;

        for (idx, vertex) in self.vertices.iter().enumerate() {
            let idx = idx as u32;
            if remap[idx as usize] != idx {
                continue;
            }

            let cell = pos_to_cell(&vertex.position, cell_size);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let Some(candidates) =
                            spatial_hash.get(&(cell.0 + dx, cell.1 + dy, cell.2 + dz))
                        else {
                            continue;
                        };
                        for &other in candidates {
                            if other <= idx || remap[other as usize] != other {
                                continue;
                            }
                            let dist = (vertex.position - self.vertices[other as usize].position)
                                .norm();
                            if dist <= tolerance {
                                remap[other as usize] = idx;
                                merged += 1;
                            }
                        }
                    }
                }
            }
        }

        if merged == 0 {
            return 0;
        }

        // Representatives keep their order; everything else folds into them.
        let mut compact = vec![u32::MAX; self.vertices.len()];
        let mut kept = Vec::with_capacity(self.vertices.len() - merged);
        for (idx, vertex) in self.vertices.iter().enumerate() {
            if remap[idx] == idx as u32 {
                compact[idx] = kept.len() as u32;
                kept.push(*vertex);
            }
        }
        self.vertices = kept;

        for face in &mut self.faces {
            for index in face.iter_mut() {
                *index = compact[remap[*index as usize] as usize];
            }
        }
        self.faces.retain(|face| {
            face.iter()
                .enumerate()
                .all(|(i, a)| face[i + 1..].iter().all(|b| a != b))
        });

        merged
    }
}

/// Convert position to spatial hash cell.
#[allow(clippy::cast_possible_truncation)]
fn pos_to_cell(pos: &Point3<f64>, cell_size: f64) -> (i64, i64, i64) {
    (
        (pos.x / cell_size).floor() as i64,
        (pos.y / cell_size).floor() as i64,
        (pos.z / cell_size).floor() as i64,
    )
}
