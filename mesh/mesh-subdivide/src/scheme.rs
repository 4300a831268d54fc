//! Strategy interface shared by the mesh schemes.

use mesh_topology::{check_winding, validate_faces};
use mesh_types::PolyMesh;

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::{SubdivideParams, SubdivisionMethod};

pub use crate::butterfly::Butterfly;
pub use crate::catmull_clark::CatmullClark;
pub use crate::loop_subdiv::LoopScheme;
pub use crate::sqrt3::Kobbelt;

/// Output of a single subdivision pass.
#[derive(Debug, Clone)]
pub struct PassOutput {
    /// The refined mesh.
    pub mesh: PolyMesh,
    /// Edges that fell back to the midpoint during this pass.
    pub stencil_fallbacks: usize,
}

impl From<PolyMesh> for PassOutput {
    fn from(mesh: PolyMesh) -> Self {
        Self {
            mesh,
            stencil_fallbacks: 0,
        }
    }
}

/// A mesh subdivision scheme.
///
/// Every pass is a pure function of the input mesh: adjacency is rebuilt
/// from the face list and dropped when the pass ends. Original vertices
/// keep their indices; new vertices are appended after them.
///
/// # Example
///
/// ```
/// use mesh_subdivide::{SubdivideParams, SubdivisionMethod};
/// use mesh_types::triangulated_cube;
///
/// let scheme = SubdivisionMethod::Loop.scheme();
/// let pass = scheme.subdivide_once(&triangulated_cube(), &SubdivideParams::default())?;
///
/// assert_eq!(scheme.name(), "Loop");
/// assert_eq!(pass.mesh.face_count(), 48);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub trait SubdivisionScheme: Send + Sync {
    /// Human-readable scheme name.
    fn name(&self) -> &'static str;

    /// The [`SubdivisionMethod`] this scheme implements.
    fn method(&self) -> SubdivisionMethod;

    /// Whether the scheme only accepts triangle meshes.
    fn requires_triangles(&self) -> bool;

    /// Face count after `iterations` passes over `mesh`.
    fn projected_faces(&self, mesh: &PolyMesh, iterations: u32) -> usize;

    /// Run one pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh is empty, malformed, non-manifold, or
    /// not made of triangles when [`Self::requires_triangles`] is set.
    fn subdivide_once(
        &self,
        mesh: &PolyMesh,
        params: &SubdivideParams,
    ) -> SubdivideResult<PassOutput>;
}

/// Check a mesh before a pass of `scheme` reads it.
pub(crate) fn validate_input(
    mesh: &PolyMesh,
    scheme: &(impl SubdivisionScheme + ?Sized),
) -> SubdivideResult<()> {
    if mesh.vertices.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }
    if mesh.faces.is_empty() {
        return Err(SubdivideError::NoFaces);
    }

    validate_faces(mesh.vertex_count(), &mesh.faces)?;
    check_winding(&mesh.faces)?;

    if scheme.requires_triangles() {
        if let Some((face, f)) = mesh.faces.iter().enumerate().find(|(_, f)| f.len() != 3) {
            return Err(SubdivideError::NonTriangularFace {
                scheme: scheme.name(),
                face,
                sides: f.len(),
            });
        }
    }
    Ok(())
}

/// `faces * factor^passes`, saturating.
pub(crate) fn grow(faces: usize, factor: usize, passes: u32) -> usize {
    (0..passes).fold(faces, |acc, _| acc.saturating_mul(factor))
}
