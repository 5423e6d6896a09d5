//! GPU upload of scene meshes
//!
//! Converts a [`TriangleMesh`] into the vertex streams the scene pipeline
//! consumes. Corners are expanded (three per triangle) so each one carries
//! its triangle index for the primitive-id channel. Positions and indices are
//! uploaded once; colors get their own buffer so the per-frame color commit
//! is a single `write_buffer`.

use wgpu::util::DeviceExt;

use quadview_core::{ColorSource, Material, TriangleMesh};

use crate::pipeline::StaticVertex;

/// A mesh uploaded to GPU buffers
pub struct GpuMesh {
    static_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    /// Source vertex index for each expanded corner
    corner_to_vertex: Vec<u32>,
    vertex_count: u32,
}

impl GpuMesh {
    /// Upload a mesh, resolving the material's color source
    pub fn new(device: &wgpu::Device, mesh: &TriangleMesh, material: &Material) -> Self {
        let mut corners = Vec::with_capacity(mesh.triangle_count() * 3);
        let mut corner_to_vertex = Vec::with_capacity(mesh.triangle_count() * 3);
        for (primitive, tri) in mesh.indices().iter().enumerate() {
            for &index in tri {
                corners.push(StaticVertex {
                    position: mesh.positions()[index as usize],
                    primitive: primitive as u32,
                });
                corner_to_vertex.push(index);
            }
        }

        let colors = resolve_corner_colors(mesh.colors(), material, &corner_to_vertex);

        let static_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Static Buffer"),
            contents: bytemuck::cast_slice(&corners),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Color Buffer"),
            contents: bytemuck::cast_slice(&colors),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            static_buffer,
            color_buffer,
            corner_to_vertex,
            vertex_count: corners.len() as u32,
        }
    }

    /// Re-upload vertex colors; this is the commit for mesh color changes
    ///
    /// Until this runs, mutations of the CPU-side mesh have no effect on the
    /// rendered image.
    pub fn write_colors(&self, queue: &wgpu::Queue, mesh: &TriangleMesh, material: &Material) {
        let colors = resolve_corner_colors(mesh.colors(), material, &self.corner_to_vertex);
        queue.write_buffer(&self.color_buffer, 0, bytemuck::cast_slice(&colors));
    }

    /// Number of expanded corners drawn
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn triangle_count(&self) -> u32 {
        self.vertex_count / 3
    }

    /// Record the draw on a pass; the pipeline must already be bound
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.static_buffer.slice(..));
        pass.set_vertex_buffer(1, self.color_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

/// Resolve one RGBA color per expanded corner from the material's source
fn resolve_corner_colors(
    vertex_colors: &[[f32; 4]],
    material: &Material,
    corner_to_vertex: &[u32],
) -> Vec<[f32; 4]> {
    match material.color {
        ColorSource::VertexColor => corner_to_vertex
            .iter()
            .map(|&v| vertex_colors[v as usize])
            .collect(),
        ColorSource::Uniform(color) => vec![color; corner_to_vertex.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_color_resolution_follows_indices() {
        let colors = vec![
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
        ];
        // Two triangles sharing an edge, quad-style.
        let corners = vec![0, 1, 2, 1, 2, 3];
        let resolved =
            resolve_corner_colors(&colors, &Material::matte_vertex_color(), &corners);
        assert_eq!(resolved.len(), 6);
        assert_eq!(resolved[0], colors[0]);
        assert_eq!(resolved[3], colors[1]);
        assert_eq!(resolved[5], colors[3]);
    }

    #[test]
    fn test_uniform_color_resolution() {
        let resolved = resolve_corner_colors(
            &[[0.0; 4]; 4],
            &Material::matte([0.2, 0.4, 0.6, 1.0]),
            &[0, 1, 2],
        );
        assert_eq!(resolved, vec![[0.2, 0.4, 0.6, 1.0]; 3]);
    }
}
