//! Undirected edge table.
//!
//! Maps every undirected edge of a face list to the faces that touch it.
//! Edges are numbered in order of first appearance (face order, then
//! corner order within each face), so anything laid out by edge id is
//! deterministic for a given input.

use hashbrown::HashMap;
use mesh_types::Face;
use smallvec::SmallVec;

use crate::error::{TopologyError, TopologyResult};

/// An undirected edge and the faces it borders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Smaller endpoint.
    pub v0: u32,
    /// Larger endpoint.
    pub v1: u32,
    /// Faces touching this edge (1 for boundary, 2 for interior).
    pub faces: SmallVec<[u32; 2]>,
}

impl Edge {
    /// Edge touched by exactly one face.
    #[inline]
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.faces.len() == 1
    }

    /// Edge shared by exactly two faces.
    #[inline]
    #[must_use]
    pub fn is_interior(&self) -> bool {
        self.faces.len() == 2
    }

    /// Check whether `v` is one of the endpoints.
    #[inline]
    #[must_use]
    pub const fn touches(&self, v: u32) -> bool {
        self.v0 == v || self.v1 == v
    }
}

/// Undirected edge table built from a face list.
///
/// # Example
///
/// ```
/// use mesh_topology::EdgeTable;
/// use mesh_types::Face;
///
/// let faces = vec![Face::from_slice(&[0, 1, 2]), Face::from_slice(&[1, 3, 2])];
/// let edges = EdgeTable::build(&faces)?;
///
/// assert_eq!(edges.len(), 5);
/// assert_eq!(edges.boundary_count(), 4);
/// assert!(edges.edge_between(2, 1).is_some_and(|e| e.is_interior()));
/// # Ok::<(), mesh_topology::TopologyError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    edges: Vec<Edge>,
    lookup: HashMap<(u32, u32), u32>,
}

impl EdgeTable {
    /// Build the table from a face list.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NonManifoldEdge`] as soon as a third face
    /// touches the same edge.
    #[allow(clippy::cast_possible_truncation)]
    pub fn build(faces: &[Face]) -> TopologyResult<Self> {
        let mut edges: Vec<Edge> = Vec::with_capacity(faces.len() * 2);
        let mut lookup: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 2);

        for (fi, face) in faces.iter().enumerate() {
            let n = face.len();
            for i in 0..n {
                let key = normalize_edge(face[i], face[(i + 1) % n]);

                if let Some(&id) = lookup.get(&key) {
                    let edge = &mut edges[id as usize];
                    edge.faces.push(fi as u32);
                    if edge.faces.len() > 2 {
                        return Err(TopologyError::NonManifoldEdge {
                            v0: key.0,
                            v1: key.1,
                            faces: edge.faces.len(),
                        });
                    }
                } else {
                    lookup.insert(key, edges.len() as u32);
                    let mut adjacent = SmallVec::new();
                    adjacent.push(fi as u32);
                    edges.push(Edge {
                        v0: key.0,
                        v1: key.1,
                        faces: adjacent,
                    });
                }
            }
        }

        Ok(Self { edges, lookup })
    }

    /// Number of undirected edges.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check whether the table has no edges.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All edges in id order.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get an edge by id.
    #[inline]
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Edge> {
        self.edges.get(id as usize)
    }

    /// Find the id of the edge between `a` and `b`, in either order.
    #[inline]
    #[must_use]
    pub fn find(&self, a: u32, b: u32) -> Option<u32> {
        self.lookup.get(&normalize_edge(a, b)).copied()
    }

    /// Find the edge between `a` and `b`, in either order.
    #[must_use]
    pub fn edge_between(&self, a: u32, b: u32) -> Option<&Edge> {
        self.find(a, b).and_then(|id| self.get(id))
    }

    /// Number of edges touched by exactly one face.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_boundary()).count()
    }

    /// Check whether every edge is shared by two faces.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.edges.iter().all(Edge::is_interior)
    }

    /// Triangle apex vertices on either side of an interior edge.
    ///
    /// Returns `(left, right)` where `left` belongs to the first face that
    /// touched the edge. Returns `None` for boundary edges, unknown ids, or
    /// when an adjacent face is not a triangle.
    #[must_use]
    pub fn opposite_vertices(&self, id: u32, faces: &[Face]) -> Option<(u32, u32)> {
        let edge = self.get(id)?;
        if !edge.is_interior() {
            return None;
        }
        let left = triangle_apex(faces.get(edge.faces[0] as usize)?, edge.v0, edge.v1)?;
        let right = triangle_apex(faces.get(edge.faces[1] as usize)?, edge.v0, edge.v1)?;
        Some((left, right))
    }
}

/// The vertex of a triangle that is not `a` or `b`.
///
/// Returns `None` if `face` is not a triangle or does not contain the edge.
#[must_use]
pub fn triangle_apex(face: &Face, a: u32, b: u32) -> Option<u32> {
    if face.len() != 3 || !face.contains(&a) || !face.contains(&b) {
        return None;
    }
    face.iter().copied().find(|&v| v != a && v != b)
}

/// Normalize edge so the smaller vertex index comes first.
#[inline]
#[must_use]
pub const fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 <= v1 { (v0, v1) } else { (v1, v0) }
}
