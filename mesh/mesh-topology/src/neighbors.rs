//! Vertex-to-vertex adjacency.

use mesh_types::Face;
use smallvec::SmallVec;

/// Neighbor lists per vertex, in order of first discovery.
///
/// Two vertices are neighbors when they are consecutive in some face. Each
/// neighbor is listed once regardless of how many faces share the edge, so
/// [`VertexNeighbors::valence`] is the number of distinct incident edges.
///
/// # Example
///
/// ```
/// use mesh_topology::VertexNeighbors;
/// use mesh_types::Face;
///
/// let faces = vec![Face::from_slice(&[0, 1, 2]), Face::from_slice(&[1, 3, 2])];
/// let neighbors = VertexNeighbors::build(4, &faces);
///
/// assert_eq!(neighbors.of(1), &[0, 2, 3]);
/// assert_eq!(neighbors.valence(0), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VertexNeighbors {
    lists: Vec<SmallVec<[u32; 8]>>,
}

impl VertexNeighbors {
    /// Build neighbor lists for `vertex_count` vertices.
    ///
    /// Indices at or beyond `vertex_count` are skipped.
    #[must_use]
    pub fn build(vertex_count: usize, faces: &[Face]) -> Self {
        let mut lists: Vec<SmallVec<[u32; 8]>> = vec![SmallVec::new(); vertex_count];

        for face in faces {
            let n = face.len();
            for i in 0..n {
                let a = face[i];
                let b = face[(i + 1) % n];
                link(&mut lists, a, b);
                link(&mut lists, b, a);
            }
        }

        Self { lists }
    }

    /// Number of vertices covered.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Check whether no vertices are covered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Neighbors of `v`. Empty for isolated or unknown vertices.
    #[inline]
    #[must_use]
    pub fn of(&self, v: u32) -> &[u32] {
        self.lists.get(v as usize).map_or(&[], |l| l.as_slice())
    }

    /// Number of distinct neighbors of `v`.
    #[inline]
    #[must_use]
    pub fn valence(&self, v: u32) -> usize {
        self.of(v).len()
    }
}

fn link(lists: &mut [SmallVec<[u32; 8]>], from: u32, to: u32) {
    if let Some(list) = lists.get_mut(from as usize) {
        if !list.contains(&to) {
            list.push(to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octahedron_vertices_have_valence_four() {
        let faces: Vec<Face> = [
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ]
        .iter()
        .map(|f: &[u32; 3]| Face::from_slice(f))
        .collect();

        let neighbors = VertexNeighbors::build(6, &faces);
        for v in 0..6 {
            assert_eq!(neighbors.valence(v), 4);
        }
        assert!(!neighbors.of(4).contains(&5));
    }

    #[test]
    fn quad_neighbors_skip_diagonals() {
        let faces = vec![Face::from_slice(&[0, 1, 2, 3])];
        let neighbors = VertexNeighbors::build(4, &faces);
        assert_eq!(neighbors.of(0), &[1, 3]);
        assert_eq!(neighbors.of(2), &[1, 3]);
    }

    #[test]
    fn isolated_and_unknown_vertices() {
        let faces = vec![Face::from_slice(&[0, 1, 2])];
        let neighbors = VertexNeighbors::build(4, &faces);
        assert_eq!(neighbors.len(), 4);
        assert_eq!(neighbors.valence(3), 0);
        assert!(neighbors.of(99).is_empty());
    }

    #[test]
    fn out_of_range_indices_ignored() {
        let faces = vec![Face::from_slice(&[0, 1, 7])];
        let neighbors = VertexNeighbors::build(2, &faces);
        assert_eq!(neighbors.of(0), &[1]);
        assert_eq!(neighbors.of(1), &[0]);
    }
}
