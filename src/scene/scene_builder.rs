//! SceneBuilder - Declarative scene construction
//!
//! Builds the static demo scene: a two-triangle quad with per-vertex colors,
//! a matte material, one surface, one world. Every object is handed to its
//! parent by value, so ownership moves exactly once along the chain
//! mesh -> surface -> world.

use quadview_core::{Material, SurfaceKey, Surface, TriangleMesh, World};

/// Vertex positions of the demo quad
pub const QUAD_POSITIONS: [[f32; 3]; 4] = [
    [-1.0, -1.0, 3.0],
    [-1.0, 1.0, 3.0],
    [1.0, -1.0, 3.0],
    [1.0, 1.0, 3.0],
];

/// Initial per-vertex colors of the demo quad
pub const QUAD_COLORS: [[f32; 4]; 4] = [
    [0.9, 0.5, 0.5, 1.0],
    [0.8, 0.8, 0.8, 1.0],
    [0.8, 0.8, 0.8, 1.0],
    [0.5, 0.9, 0.5, 1.0],
];

/// Triangle indices of the demo quad
pub const QUAD_INDICES: [[u32; 3]; 2] = [[0, 1, 2], [1, 2, 3]];

/// Id reported by the quad surface in the object-id channel
pub const SURFACE_ID: u32 = 2;
/// Id reported by the world in the instance-id channel
pub const WORLD_ID: u32 = 3;

/// A built scene: the world plus the key of the animated quad surface
pub struct DemoScene {
    pub world: World,
    pub quad: SurfaceKey,
}

impl DemoScene {
    /// The animated quad surface
    pub fn quad_surface(&self) -> &Surface {
        match self.world.surface(self.quad) {
            Some(surface) => surface,
            // The key is created together with the world and never removed.
            None => unreachable!("quad surface key is always live"),
        }
    }

    /// Mutable access to the animated quad surface
    pub fn quad_surface_mut(&mut self) -> &mut Surface {
        match self.world.surface_mut(self.quad) {
            Some(surface) => surface,
            None => unreachable!("quad surface key is always live"),
        }
    }
}

/// Builder for the demo scene
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new().add_quad().build();
/// ```
pub struct SceneBuilder {
    world: World,
    quad: Option<SurfaceKey>,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new() -> Self {
        Self {
            world: World::new().with_id(WORLD_ID),
            quad: None,
        }
    }

    /// Add the animated two-triangle quad surface
    pub fn add_quad(mut self) -> Self {
        let key = self.insert_quad();
        self.quad = Some(key);
        self
    }

    /// Finish the scene
    ///
    /// The quad is the whole demo; if it was never added, it is added here so
    /// the animation loop always has a target.
    pub fn build(mut self) -> DemoScene {
        let quad = match self.quad {
            Some(key) => key,
            None => self.insert_quad(),
        };
        DemoScene {
            world: self.world,
            quad,
        }
    }

    fn insert_quad(&mut self) -> SurfaceKey {
        let mesh = match TriangleMesh::new(
            QUAD_POSITIONS.to_vec(),
            QUAD_COLORS.to_vec(),
            QUAD_INDICES.to_vec(),
        ) {
            Ok(mesh) => mesh,
            // The arrays above are constants; a mismatch is a programming
            // error, caught by tests.
            Err(e) => unreachable!("demo quad arrays are inconsistent: {}", e),
        };

        let surface = Surface::new(mesh, Material::matte_vertex_color()).with_id(SURFACE_ID);
        self.world.add_surface(surface)
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadview_core::ColorSource;

    #[test]
    fn test_scene_has_one_surface() {
        let scene = SceneBuilder::new().add_quad().build();
        assert_eq!(scene.world.surface_count(), 1);
        assert_eq!(scene.world.id(), WORLD_ID);
    }

    #[test]
    fn test_quad_topology_and_ids() {
        let scene = SceneBuilder::new().add_quad().build();
        let surface = scene.world.surface(scene.quad).unwrap();
        assert_eq!(surface.id(), SURFACE_ID);
        assert_eq!(surface.mesh().vertex_count(), 4);
        assert_eq!(surface.mesh().triangle_count(), 2);
        assert_eq!(surface.material().color, ColorSource::VertexColor);
    }

    #[test]
    fn test_build_without_add_quad_still_has_quad() {
        let scene = SceneBuilder::new().build();
        assert_eq!(scene.world.surface_count(), 1);
        assert_eq!(scene.quad_surface().id(), SURFACE_ID);
    }

    #[test]
    fn test_quad_indices_in_range() {
        for tri in QUAD_INDICES {
            for index in tri {
                assert!((index as usize) < QUAD_POSITIONS.len());
            }
        }
    }
}
