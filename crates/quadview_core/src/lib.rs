//! Scene description types for the quadview demo
//!
//! This crate holds the CPU-side scene model:
//!
//! - [`TriangleMesh`] - indexed triangle geometry with per-vertex colors
//! - [`Material`] - matte material with a configurable color source
//! - [`Surface`] - pairing of one mesh and one material
//! - [`World`] - keyed container of surfaces
//!
//! Objects move into their parent on attach (a mesh into a surface, a surface
//! into a world), so every scene object has exactly one owner at all times.
//! Nothing here touches the GPU; uploading lives in `quadview_render`.

mod material;
mod mesh;
mod surface;
mod world;

pub use material::{ColorSource, Material};
pub use mesh::{MeshError, TriangleMesh};
pub use surface::Surface;
pub use world::{SurfaceKey, World};
