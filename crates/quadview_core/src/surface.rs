//! Surface: one mesh paired with one material
//!
//! A surface takes its geometry and material by value, so attaching a mesh
//! hands ownership over and the mesh cannot be attached twice.

use crate::{Material, TriangleMesh};

/// One renderable object: geometry plus material plus a numeric id
///
/// The id is written to the object-id channel of the frame target and can be
/// used to identify the surface under a pixel.
#[derive(Debug, Clone)]
pub struct Surface {
    mesh: TriangleMesh,
    material: Material,
    id: u32,
}

impl Surface {
    /// Pair a mesh with a material
    pub fn new(mesh: TriangleMesh, material: Material) -> Self {
        Self {
            mesh,
            material,
            id: 0,
        }
    }

    /// Set the surface id reported in the object-id channel
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut TriangleMesh {
        &mut self.mesh
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_id() {
        let mesh = TriangleMesh::new(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[1.0; 4]; 3],
            vec![[0, 1, 2]],
        )
        .unwrap();
        let surface = Surface::new(mesh, Material::default()).with_id(2);
        assert_eq!(surface.id(), 2);
        assert_eq!(surface.mesh().triangle_count(), 1);
    }
}
