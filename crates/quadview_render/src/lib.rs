//! GPU rendering layer for the quadview demo
//!
//! This crate provides the wgpu-based rendering path that turns the scene
//! model from `quadview_core` into pixels.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - wgpu device, queue, and surface management
//! - [`camera::Camera`] - perspective camera with position/direction/up
//! - [`pipeline::ScenePipeline`] - renders surfaces into the frame target
//! - [`pipeline::BlitPipeline`] - copies the frame color image to the window
//! - [`renderable::GpuMesh`] - uploads a `TriangleMesh` to GPU buffers
//! - [`frame::FrameTarget`] - offscreen output image with color and id
//!   channels, synchronous render/wait, and scoped channel mapping

pub mod camera;
pub mod context;
pub mod frame;
pub mod pipeline;
pub mod renderable;

pub use camera::Camera;
pub use context::{ContextError, DeviceCapabilities, RenderContext};
pub use frame::{ChannelKind, Channels, FrameTarget, MappedChannel, INVALID_ID};
pub use pipeline::{BlitPipeline, ScenePipeline, SceneUniforms, StaticVertex};
pub use renderable::GpuMesh;
