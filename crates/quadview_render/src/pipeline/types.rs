//! GPU-compatible data types for the scene pipeline
//!
//! These types match the shader layouts exactly and derive Pod/Zeroable for
//! safe buffer uploads.

use bytemuck::{Pod, Zeroable};

/// Static per-corner vertex data: position plus the owning triangle index
///
/// The primitive index is flat-interpolated in the shader and lands in the
/// primitive-id channel of the frame target.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StaticVertex {
    pub position: [f32; 3],
    pub primitive: u32,
}

impl StaticVertex {
    /// Vertex buffer layout for the static (position + primitive) stream
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StaticVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        }
    }

    /// Vertex buffer layout for the per-corner RGBA color stream
    pub fn color_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 4) as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            }],
        }
    }
}

/// Uniforms shared by the vertex and fragment stages
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Combined view-projection matrix
    pub view_proj: [[f32; 4]; 4],
    /// Flat ambient term applied to the matte material
    pub ambient_radiance: f32,
    /// Value written to the object-id channel
    pub object_id: u32,
    /// Value written to the instance-id channel
    pub instance_id: u32,
    pub _padding: u32,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            ambient_radiance: 1.0,
            object_id: 0,
            instance_id: 0,
            _padding: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_vertex_layout_stride() {
        let layout = StaticVertex::layout();
        assert_eq!(layout.array_stride, std::mem::size_of::<StaticVertex>() as u64);
        assert_eq!(layout.array_stride, 16);
    }

    #[test]
    fn test_scene_uniforms_size() {
        // Uniform buffers require 16-byte multiples.
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 80);
    }
}
