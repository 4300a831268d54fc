//! Multi-pass subdivision driver.

use mesh_types::PolyMesh;
use tracing::{debug, info};

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::SubdivideParams;
use crate::result::SubdivisionResult;
use crate::scheme::SubdivisionScheme;

/// Subdivide a mesh using the specified parameters.
///
/// Runs `params.iterations` passes of `params.method`, each consuming the
/// complete output of the previous one. Zero iterations returns a copy of
/// the input without looking at it.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh is empty (no vertices or faces)
/// - The resulting mesh would exceed `max_faces`
/// - A face is malformed, an edge is shared by more than two faces, or the
///   winding is inconsistent
/// - The method needs triangles and the mesh has other polygons
/// - The √3 boundary rule is [`Reject`](crate::Sqrt3Boundary::Reject) and the
///   mesh is open
///
/// # Examples
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let result = subdivide_mesh(&unit_cube(), &SubdivideParams::catmull_clark())?;
///
/// // 8 + 12 + 6 vertices, every quad split into 4
/// assert_eq!(result.final_vertices, 26);
/// assert_eq!(result.final_faces, 24);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh(
    mesh: &PolyMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    if params.iterations == 0 {
        return Ok(SubdivisionResult::unchanged(mesh, params.method));
    }

    let scheme = params.method.scheme();
    check_size(mesh, scheme, params.iterations, params.max_faces)?;

    let original_faces = mesh.face_count();
    let original_vertices = mesh.vertex_count();

    info!(
        scheme = scheme.name(),
        faces = original_faces,
        vertices = original_vertices,
        iterations = params.iterations,
        "Subdividing mesh"
    );

    let mut current = mesh.clone();
    let mut stencil_fallbacks = 0;
    for i in 0..params.iterations {
        let pass = scheme.subdivide_once(&current, params)?;
        stencil_fallbacks += pass.stencil_fallbacks;
        current = pass.mesh;
        debug!(
            "Iteration {}: {} faces, {} vertices",
            i + 1,
            current.face_count(),
            current.vertex_count()
        );
    }

    let result = SubdivisionResult {
        original_faces,
        final_faces: current.face_count(),
        original_vertices,
        final_vertices: current.vertex_count(),
        iterations: params.iterations,
        method: params.method,
        stencil_fallbacks,
        mesh: current,
    };
    info!("{result}");
    Ok(result)
}

/// Run exactly one pass of `params.method`, ignoring `params.iterations`.
///
/// # Errors
///
/// Same conditions as [`subdivide_mesh`], with the size check applied to a
/// single pass.
///
/// # Examples
///
/// ```
/// use mesh_types::triangulated_cube;
/// use mesh_subdivide::{subdivide_once, SubdivideParams};
///
/// let cube = triangulated_cube();
/// let refined = subdivide_once(&cube, &SubdivideParams::kobbelt())?;
///
/// // One centroid per face, face count triples
/// assert_eq!(refined.vertex_count(), 8 + 12);
/// assert_eq!(refined.face_count(), 36);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_once(mesh: &PolyMesh, params: &SubdivideParams) -> SubdivideResult<PolyMesh> {
    let scheme = params.method.scheme();
    check_size(mesh, scheme, 1, params.max_faces)?;
    scheme
        .subdivide_once(mesh, params)
        .map(|pass| pass.mesh)
}

/// Reject empty input and projected output above `max_faces` before any
/// pass runs.
fn check_size(
    mesh: &PolyMesh,
    scheme: &dyn SubdivisionScheme,
    iterations: u32,
    max_faces: usize,
) -> SubdivideResult<()> {
    if mesh.vertices.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }
    if mesh.faces.is_empty() {
        return Err(SubdivideError::NoFaces);
    }

    let projected = scheme.projected_faces(mesh, iterations);
    if projected > max_faces {
        return Err(SubdivideError::MeshTooLarge {
            current: mesh.face_count(),
            projected,
            max: max_faces,
        });
    }
    Ok(())
}
