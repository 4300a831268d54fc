//! Face list validation and topology reporting.
//!
//! [`validate_faces`] is the strict check run before every subdivision
//! pass. [`analyze`] is the lenient counterpart: it never fails and
//! summarizes what it finds.

use hashbrown::{HashMap, HashSet};
use mesh_types::{Face, PolyMesh};

use crate::edges::normalize_edge;
use crate::error::{TopologyError, TopologyResult};

/// Check that every face is a usable polygon.
///
/// Each face must have at least three vertices, reference only existing
/// vertices, and list each vertex once. Edge sharing is checked separately
/// when the adjacency is built.
///
/// # Errors
///
/// Returns the first [`TopologyError::DegenerateFace`],
/// [`TopologyError::IndexOutOfBounds`] or [`TopologyError::RepeatedVertex`]
/// found, scanning faces in order.
///
/// # Example
///
/// ```
/// use mesh_topology::{validate_faces, TopologyError};
/// use mesh_types::Face;
///
/// let faces = vec![Face::from_slice(&[0, 1, 2])];
/// assert!(validate_faces(3, &faces).is_ok());
/// assert!(matches!(
///     validate_faces(2, &faces),
///     Err(TopologyError::IndexOutOfBounds { index: 2, .. })
/// ));
/// ```
pub fn validate_faces(vertex_count: usize, faces: &[Face]) -> TopologyResult<()> {
    for (fi, face) in faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(TopologyError::DegenerateFace {
                face: fi,
                sides: face.len(),
            });
        }

        for (i, &index) in face.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(TopologyError::IndexOutOfBounds {
                    face: fi,
                    index,
                    vertex_count,
                });
            }
            if face[..i].contains(&index) {
                return Err(TopologyError::RepeatedVertex {
                    face: fi,
                    vertex: index,
                });
            }
        }
    }
    Ok(())
}

/// Check that neighboring faces agree on orientation.
///
/// Every directed edge `(from, to)` may appear in at most one face. Run
/// [`validate_faces`] first; indices are not range-checked here.
///
/// # Errors
///
/// Returns [`TopologyError::InconsistentWinding`] for the first directed
/// edge used twice, or [`TopologyError::NonManifoldEdge`] when the reverse
/// direction is taken as well, meaning a third face touches the edge.
///
/// # Example
///
/// ```
/// use mesh_topology::{check_winding, TopologyError};
/// use mesh_types::Face;
///
/// let faces = vec![Face::from_slice(&[0, 1, 2]), Face::from_slice(&[0, 1, 3])];
/// assert!(matches!(
///     check_winding(&faces),
///     Err(TopologyError::InconsistentWinding { from: 0, to: 1, first: 0, second: 1 })
/// ));
/// ```
pub fn check_winding(faces: &[Face]) -> TopologyResult<()> {
    let total: usize = faces.iter().map(|f| f.len()).sum();
    let mut owner: HashMap<(u32, u32), usize> = HashMap::with_capacity(total);

    for (fi, face) in faces.iter().enumerate() {
        let n = face.len();
        for i in 0..n {
            let (from, to) = (face[i], face[(i + 1) % n]);
            if let Some(&first) = owner.get(&(from, to)) {
                if owner.contains_key(&(to, from)) {
                    let (v0, v1) = normalize_edge(from, to);
                    return Err(TopologyError::NonManifoldEdge { v0, v1, faces: 3 });
                }
                return Err(TopologyError::InconsistentWinding {
                    from,
                    to,
                    first,
                    second: fi,
                });
            }
            owner.insert((from, to), fi);
        }
    }
    Ok(())
}

/// Summary of a mesh's connectivity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of faces.
    pub face_count: usize,
    /// Number of distinct undirected edges.
    pub edge_count: usize,

    /// Edges with exactly one adjacent face.
    pub boundary_edge_count: usize,
    /// Edges with exactly two adjacent faces.
    pub interior_edge_count: usize,
    /// Edges with more than two adjacent faces.
    pub non_manifold_edge_count: usize,
    /// Faces with fewer than three vertices, repeated vertices, or
    /// out-of-range indices.
    pub invalid_face_count: usize,
    /// Vertices not referenced by any face.
    pub isolated_vertex_count: usize,
}

impl TopologyReport {
    /// No invalid faces and no edge shared by more than two faces.
    #[must_use]
    pub const fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0 && self.invalid_face_count == 0
    }

    /// Manifold with no boundary edges.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.is_manifold() && self.boundary_edge_count == 0
    }

    /// Whether every scheme can run on this mesh, boundaries aside.
    #[must_use]
    pub const fn is_subdividable(&self) -> bool {
        self.is_manifold() && self.face_count > 0
    }

    /// Euler characteristic `V - E + F`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn euler_characteristic(&self) -> i64 {
        self.vertex_count as i64 - self.edge_count as i64 + self.face_count as i64
    }
}

impl std::fmt::Display for TopologyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Topology Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f, "  Euler characteristic: {}", self.euler_characteristic())?;
        writeln!(
            f,
            "  Manifold: {}",
            if self.is_manifold() { "Yes" } else { "No" }
        )?;
        writeln!(f, "  Closed: {}", if self.is_closed() { "Yes" } else { "No" })?;

        if self.boundary_edge_count > 0 {
            writeln!(f, "  Boundary edges: {}", self.boundary_edge_count)?;
        }
        if self.non_manifold_edge_count > 0 {
            writeln!(f, "  Non-manifold edges: {}", self.non_manifold_edge_count)?;
        }
        if self.invalid_face_count > 0 {
            writeln!(f, "  Invalid faces: {}", self.invalid_face_count)?;
        }
        if self.isolated_vertex_count > 0 {
            writeln!(f, "  Isolated vertices: {}", self.isolated_vertex_count)?;
        }
        Ok(())
    }
}

/// Analyze a mesh without failing on malformed input.
///
/// Invalid faces are counted and left out of the edge statistics.
///
/// # Example
///
/// ```
/// use mesh_topology::analyze;
/// use mesh_types::unit_cube;
///
/// let report = analyze(&unit_cube());
/// assert_eq!(report.edge_count, 12);
/// assert!(report.is_closed());
/// assert_eq!(report.euler_characteristic(), 2);
/// ```
#[must_use]
pub fn analyze(mesh: &PolyMesh) -> TopologyReport {
    let vertex_count = mesh.vertex_count();
    let mut edge_faces: HashMap<(u32, u32), usize> = HashMap::new();
    let mut used: HashSet<u32> = HashSet::new();
    let mut invalid_face_count = 0;

    for (fi, face) in mesh.faces.iter().enumerate() {
        if validate_faces(vertex_count, std::slice::from_ref(face)).is_err() {
            tracing::trace!(face = fi, "Skipping invalid face");
            invalid_face_count += 1;
            continue;
        }
        let n = face.len();
        for i in 0..n {
            used.insert(face[i]);
            *edge_faces
                .entry(normalize_edge(face[i], face[(i + 1) % n]))
                .or_insert(0) += 1;
        }
    }

    let mut report = TopologyReport {
        vertex_count,
        face_count: mesh.face_count(),
        edge_count: edge_faces.len(),
        invalid_face_count,
        isolated_vertex_count: vertex_count.saturating_sub(used.len()),
        ..TopologyReport::default()
    };

    for &count in edge_faces.values() {
        match count {
            1 => report.boundary_edge_count += 1,
            2 => report.interior_edge_count += 1,
            _ => report.non_manifold_edge_count += 1,
        }
    }

    report
}
