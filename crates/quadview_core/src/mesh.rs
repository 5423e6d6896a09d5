//! Indexed triangle mesh with per-vertex colors
//!
//! The mesh is plain CPU data. Vertex colors are the only attribute that is
//! expected to change after construction; positions and indices are fixed.

/// Errors produced when constructing a mesh from raw arrays
#[derive(Debug, PartialEq, Eq)]
pub enum MeshError {
    /// Color array length does not match the position array length
    ColorCountMismatch { vertices: usize, colors: usize },
    /// An index references a vertex that does not exist
    IndexOutOfRange { triangle: usize, index: u32 },
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::ColorCountMismatch { vertices, colors } => write!(
                f,
                "mesh has {} vertices but {} colors",
                vertices, colors
            ),
            MeshError::IndexOutOfRange { triangle, index } => write!(
                f,
                "triangle {} references out-of-range vertex {}",
                triangle, index
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// An indexed triangle mesh with one RGBA color per vertex
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Build a mesh from raw arrays, validating array lengths and indices
    pub fn new(
        positions: Vec<[f32; 3]>,
        colors: Vec<[f32; 4]>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, MeshError> {
        if colors.len() != positions.len() {
            return Err(MeshError::ColorCountMismatch {
                vertices: positions.len(),
                colors: colors.len(),
            });
        }
        for (triangle, tri) in indices.iter().enumerate() {
            for &index in tri {
                if index as usize >= positions.len() {
                    return Err(MeshError::IndexOutOfRange { triangle, index });
                }
            }
        }
        Ok(Self {
            positions,
            colors,
            indices,
        })
    }

    /// Vertex positions
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Per-vertex colors
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    /// Triangle index triples
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Overwrite the color of one vertex
    ///
    /// Out-of-range indices are ignored; the mesh shape never changes after
    /// construction.
    pub fn set_vertex_color(&mut self, vertex: usize, color: [f32; 4]) {
        if let Some(slot) = self.colors.get_mut(vertex) {
            *slot = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> TriangleMesh {
        TriangleMesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[1.0, 1.0, 1.0, 1.0]; 3],
            vec![[0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_valid_mesh() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_color_count_mismatch() {
        let err = TriangleMesh::new(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[1.0; 4]; 2],
            vec![[0, 1, 2]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::ColorCountMismatch {
                vertices: 3,
                colors: 2
            }
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let err = TriangleMesh::new(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[1.0; 4]; 3],
            vec![[0, 1, 3]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                triangle: 0,
                index: 3
            }
        );
    }

    #[test]
    fn test_set_vertex_color() {
        let mut mesh = triangle();
        mesh.set_vertex_color(1, [0.5, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.colors()[1], [0.5, 0.0, 0.0, 1.0]);
        // Out-of-range writes are dropped
        mesh.set_vertex_color(99, [0.0; 4]);
        assert_eq!(mesh.colors().len(), 3);
    }
}
