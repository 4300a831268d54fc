//! Result types for subdivision operations.

// Face counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::PolyMesh;

use crate::params::SubdivisionMethod;

/// Result of mesh subdivision.
#[derive(Debug, Clone)]
pub struct SubdivisionResult {
    /// The subdivided mesh.
    pub mesh: PolyMesh,

    /// Number of faces in original mesh.
    pub original_faces: usize,

    /// Number of faces in subdivided mesh.
    pub final_faces: usize,

    /// Number of vertices in original mesh.
    pub original_vertices: usize,

    /// Number of vertices in subdivided mesh.
    pub final_vertices: usize,

    /// Number of iterations performed.
    pub iterations: u32,

    /// Subdivision method used.
    pub method: SubdivisionMethod,

    /// Edges whose stencil could not be applied and fell back to the
    /// midpoint, summed over all passes. Only Butterfly produces these.
    pub stencil_fallbacks: usize,
}

impl SubdivisionResult {
    /// Wrap a mesh that was returned without any pass being run.
    #[must_use]
    pub fn unchanged(mesh: &PolyMesh, method: SubdivisionMethod) -> Self {
        Self {
            mesh: mesh.clone(),
            original_faces: mesh.face_count(),
            final_faces: mesh.face_count(),
            original_vertices: mesh.vertex_count(),
            final_vertices: mesh.vertex_count(),
            iterations: 0,
            method,
            stencil_fallbacks: 0,
        }
    }

    /// Get the face multiplication factor.
    #[must_use]
    pub fn face_ratio(&self) -> f64 {
        if self.original_faces == 0 {
            1.0
        } else {
            self.final_faces as f64 / self.original_faces as f64
        }
    }

    /// Get the vertex multiplication factor.
    #[must_use]
    pub fn vertex_ratio(&self) -> f64 {
        if self.original_vertices == 0 {
            1.0
        } else {
            self.final_vertices as f64 / self.original_vertices as f64
        }
    }

    /// Check if any subdivision occurred.
    #[must_use]
    pub const fn was_subdivided(&self) -> bool {
        self.iterations > 0 && self.final_faces > self.original_faces
    }
}

impl std::fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subdivision ({:?}): {} → {} faces ({:.1}x), {} → {} vertices, {} iterations",
            self.method,
            self.original_faces,
            self.final_faces,
            self.face_ratio(),
            self.original_vertices,
            self.final_vertices,
            self.iterations
        )?;
        if self.stencil_fallbacks > 0 {
            write!(f, ", {} stencil fallbacks", self.stencil_fallbacks)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::unit_cube;

    fn sample(method: SubdivisionMethod) -> SubdivisionResult {
        SubdivisionResult {
            mesh: PolyMesh::new(),
            original_faces: 100,
            final_faces: 400,
            original_vertices: 50,
            final_vertices: 200,
            iterations: 1,
            method,
            stencil_fallbacks: 0,
        }
    }

    #[test]
    fn test_face_ratio() {
        let result = sample(SubdivisionMethod::Loop);
        assert!((result.face_ratio() - 4.0).abs() < 0.001);
        assert!((result.vertex_ratio() - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_was_subdivided() {
        let cube = unit_cube();
        let result = SubdivisionResult::unchanged(&cube, SubdivisionMethod::CatmullClark);
        assert!(!result.was_subdivided());
        assert_eq!(result.mesh, cube);
        assert!((result.face_ratio() - 1.0).abs() < f64::EPSILON);

        assert!(sample(SubdivisionMethod::Kobbelt).was_subdivided());
    }

    #[test]
    fn test_display() {
        let result = sample(SubdivisionMethod::Butterfly);
        let display = format!("{result}");
        assert!(display.contains("100"));
        assert!(display.contains("400"));
        assert!(display.contains("4.0x"));
        assert!(display.contains("Butterfly"));
        assert!(!display.contains("fallbacks"));

        let result = SubdivisionResult {
            stencil_fallbacks: 6,
            ..sample(SubdivisionMethod::Butterfly)
        };
        assert!(format!("{result}").contains("6 stencil fallbacks"));
    }
}
