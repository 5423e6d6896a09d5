//! Rendering pipeline components
//!
//! Two pipelines drive the demo: the scene pipeline draws surfaces into the
//! frame target (color plus optional id channels), and the blit pipeline
//! copies the frame color image onto the window surface.

pub mod blit_pipeline;
pub mod scene_pipeline;
pub mod types;

pub use blit_pipeline::BlitPipeline;
pub use scene_pipeline::ScenePipeline;
pub use types::{SceneUniforms, StaticVertex};
