//! World container for surfaces
//!
//! The World is the top-level scene object handed to the frame target. It
//! owns every surface added to it.

use slotmap::SlotMap;

use crate::Surface;

slotmap::new_key_type! {
    /// A stable handle to a surface in a [`World`]
    pub struct SurfaceKey;
}

/// The top-level scene container
#[derive(Debug, Default)]
pub struct World {
    surfaces: SlotMap<SurfaceKey, Surface>,
    id: u32,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the world id reported in the instance-id channel
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Add a surface, taking ownership, and return its handle
    pub fn add_surface(&mut self, surface: Surface) -> SurfaceKey {
        self.surfaces.insert(surface)
    }

    /// Remove a surface, returning it if the key was live
    pub fn remove_surface(&mut self, key: SurfaceKey) -> Option<Surface> {
        self.surfaces.remove(key)
    }

    pub fn surface(&self, key: SurfaceKey) -> Option<&Surface> {
        self.surfaces.get(key)
    }

    pub fn surface_mut(&mut self, key: SurfaceKey) -> Option<&mut Surface> {
        self.surfaces.get_mut(key)
    }

    /// Iterate over all surfaces with their keys
    pub fn iter(&self) -> impl Iterator<Item = (SurfaceKey, &Surface)> {
        self.surfaces.iter()
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, TriangleMesh};

    fn surface() -> Surface {
        let mesh = TriangleMesh::new(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[1.0; 4]; 3],
            vec![[0, 1, 2]],
        )
        .unwrap();
        Surface::new(mesh, Material::default())
    }

    #[test]
    fn test_add_and_get() {
        let mut world = World::new().with_id(3);
        let key = world.add_surface(surface().with_id(2));
        assert_eq!(world.surface_count(), 1);
        assert_eq!(world.surface(key).unwrap().id(), 2);
        assert_eq!(world.id(), 3);
    }

    #[test]
    fn test_remove_invalidates_key() {
        let mut world = World::new();
        let key = world.add_surface(surface());
        assert!(world.remove_surface(key).is_some());
        assert!(world.surface(key).is_none());
        assert_eq!(world.surface_count(), 0);
    }
}
