//! Index-based half-edge arena.
//!
//! Every face of `n` vertices contributes `n` directed half-edges stored
//! contiguously, so half-edge `first + i` runs from `face[i]` to
//! `face[i + 1]`. Links are plain `u32` indices into the arena; no half-edge
//! owns another. Opposite links are resolved through a map keyed on the
//! directed vertex pair.
//!
//! Each pair of opposite half-edges shares one undirected edge id, so
//! per-edge data (such as a newly inserted vertex) can be stored once in a
//! flat `Vec` indexed by [`HalfEdge::edge`] and read from both directions.

use hashbrown::HashMap;
use mesh_types::Face;
use tracing::debug;

use crate::edges::normalize_edge;
use crate::error::{TopologyError, TopologyResult};

/// A directed edge of one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// Start vertex.
    pub from: u32,
    /// End vertex.
    pub to: u32,
    /// Face this half-edge belongs to.
    pub face: u32,
    /// Next half-edge around the same face.
    pub next: u32,
    /// Half-edge running the other way in the adjacent face, if any.
    pub opposite: Option<u32>,
    /// Undirected edge id shared with the opposite half-edge.
    pub edge: u32,
}

/// Half-edge connectivity for a polygon face list.
///
/// # Example
///
/// ```
/// use mesh_topology::HalfEdgeMesh;
/// use mesh_types::Face;
///
/// let faces = vec![Face::from_slice(&[0, 1, 2]), Face::from_slice(&[1, 3, 2])];
/// let he = HalfEdgeMesh::build(&faces)?;
///
/// let h = he.find(1, 2).unwrap();
/// assert_eq!(he.apex(h), Some(0));
/// let o = he.get(h).and_then(|half| half.opposite).unwrap();
/// assert_eq!(he.apex(o), Some(3));
///
/// // Ids from another arena are not an error, just absent
/// assert_eq!(he.get(99), None);
/// assert_eq!(he.apex(99), None);
/// # Ok::<(), mesh_topology::TopologyError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    half_edges: Vec<HalfEdge>,
    face_first: Vec<u32>,
    lookup: HashMap<(u32, u32), u32>,
    edge_count: usize,
}

impl HalfEdgeMesh {
    /// Build half-edges for every face and link opposites.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InconsistentWinding`] if two faces contain
    /// the same directed edge, which happens when neighboring faces disagree
    /// on orientation. Returns [`TopologyError::NonManifoldEdge`] instead when
    /// the reverse direction is also taken, meaning a third face touches the
    /// edge.
    #[allow(clippy::cast_possible_truncation)]
    pub fn build(faces: &[Face]) -> TopologyResult<Self> {
        let total: usize = faces.iter().map(|f| f.len()).sum();
        let mut half_edges: Vec<HalfEdge> = Vec::with_capacity(total);
        let mut face_first: Vec<u32> = Vec::with_capacity(faces.len());
        let mut lookup: HashMap<(u32, u32), u32> = HashMap::with_capacity(total);

        for (fi, face) in faces.iter().enumerate() {
            let first = half_edges.len() as u32;
            face_first.push(first);
            let n = face.len();

            for i in 0..n {
                let from = face[i];
                let to = face[(i + 1) % n];
                let h = first + i as u32;

                if let Some(&existing) = lookup.get(&(from, to)) {
                    // Both directions already taken: a third face on this edge
                    if lookup.contains_key(&(to, from)) {
                        let (v0, v1) = normalize_edge(from, to);
                        return Err(TopologyError::NonManifoldEdge { v0, v1, faces: 3 });
                    }
                    return Err(TopologyError::InconsistentWinding {
                        from,
                        to,
                        first: half_edges[existing as usize].face as usize,
                        second: fi,
                    });
                }
                lookup.insert((from, to), h);

                half_edges.push(HalfEdge {
                    from,
                    to,
                    face: fi as u32,
                    next: first + ((i + 1) % n) as u32,
                    opposite: None,
                    edge: u32::MAX,
                });
            }
        }

        // Link opposites and hand out undirected edge ids in arena order.
        let mut edge_count: u32 = 0;
        for h in 0..half_edges.len() {
            let HalfEdge { from, to, .. } = half_edges[h];
            let opposite = lookup.get(&(to, from)).copied();
            half_edges[h].opposite = opposite;

            half_edges[h].edge = match opposite {
                Some(o) if (o as usize) < h => half_edges[o as usize].edge,
                _ => {
                    edge_count += 1;
                    edge_count - 1
                }
            };
        }

        debug!(
            faces = faces.len(),
            half_edges = half_edges.len(),
            edges = edge_count,
            "Built half-edge structure"
        );

        Ok(Self {
            half_edges,
            face_first,
            lookup,
            edge_count: edge_count as usize,
        })
    }

    /// Number of half-edges.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.half_edges.len()
    }

    /// Check whether the arena is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.half_edges.is_empty()
    }

    /// Number of undirected edges (distinct [`HalfEdge::edge`] ids).
    #[inline]
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of faces the arena was built from.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.face_first.len()
    }

    /// All half-edges in arena order.
    #[inline]
    #[must_use]
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// Get a half-edge by index, or `None` if `h` is not in this arena.
    #[inline]
    #[must_use]
    pub fn get(&self, h: u32) -> Option<&HalfEdge> {
        self.half_edges.get(h as usize)
    }

    /// Find the half-edge running from `from` to `to`.
    #[inline]
    #[must_use]
    pub fn find(&self, from: u32, to: u32) -> Option<u32> {
        self.lookup.get(&(from, to)).copied()
    }

    /// First half-edge of a face (the one leaving `face[0]`).
    #[inline]
    #[must_use]
    pub fn face_half_edge(&self, face: u32) -> Option<u32> {
        self.face_first.get(face as usize).copied()
    }

    /// Walk the half-edges around a face in winding order.
    pub fn face_loop(&self, face: u32) -> impl Iterator<Item = u32> + '_ {
        let start = self.face_half_edge(face);
        let mut current = start;
        std::iter::from_fn(move || {
            let h = current?;
            let next = self.get(h)?.next;
            current = if Some(next) == start { None } else { Some(next) };
            Some(h)
        })
    }

    /// Vertex at the tip of `next(h)`.
    ///
    /// For a triangle this is the corner opposite half-edge `h`. `None`
    /// if `h` is not in this arena.
    #[inline]
    #[must_use]
    pub fn apex(&self, h: u32) -> Option<u32> {
        let next = self.get(h)?.next;
        self.get(next).map(|half| half.to)
    }

    /// Apex of the face on the other side of `h`. `None` on the boundary.
    #[must_use]
    pub fn opposite_apex(&self, h: u32) -> Option<u32> {
        self.apex(self.get(h)?.opposite?)
    }

    /// Check whether `h` is a half-edge of this arena with no opposite.
    #[inline]
    #[must_use]
    pub fn is_boundary(&self, h: u32) -> bool {
        self.get(h).is_some_and(|half| half.opposite.is_none())
    }

    /// Number of half-edges without an opposite.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.half_edges.iter().filter(|h| h.opposite.is_none()).count()
    }
}
