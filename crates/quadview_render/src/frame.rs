//! Frame target: the offscreen output image and its channels
//!
//! The frame target owns one texture per channel (color plus the optional
//! primitive/object/instance id channels) and a readback buffer for every
//! channel declared at creation. Rendering is synchronous: `render` submits
//! exactly one command buffer and `wait` blocks on that submission. Channel
//! contents are read through [`MappedChannel`], a scoped guard that unmaps on
//! drop.

use std::sync::Arc;

use crate::pipeline::ScenePipeline;
use crate::renderable::GpuMesh;

/// Id value written where no geometry was hit
pub const INVALID_ID: u32 = u32::MAX;

bitflags::bitflags! {
    /// Output channels a frame target can declare
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Channels: u32 {
        const COLOR = 1 << 0;
        const PRIMITIVE_ID = 1 << 1;
        const OBJECT_ID = 1 << 2;
        const INSTANCE_ID = 1 << 3;
    }
}

impl Channels {
    /// Whether any id channel is declared
    pub fn has_ids(self) -> bool {
        self.intersects(Channels::PRIMITIVE_ID | Channels::OBJECT_ID | Channels::INSTANCE_ID)
    }
}

/// One addressable output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Color,
    PrimitiveId,
    ObjectId,
    InstanceId,
}

impl ChannelKind {
    /// The declaration bit for this channel
    pub fn mask(self) -> Channels {
        match self {
            ChannelKind::Color => Channels::COLOR,
            ChannelKind::PrimitiveId => Channels::PRIMITIVE_ID,
            ChannelKind::ObjectId => Channels::OBJECT_ID,
            ChannelKind::InstanceId => Channels::INSTANCE_ID,
        }
    }
}

/// Texture plus optional readback buffer for one channel
struct ChannelTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    /// Present only for declared channels; mapping an undeclared channel
    /// yields `None`.
    readback: Option<wgpu::Buffer>,
}

/// The offscreen output image
///
/// Declaration order of the GPU resources matters only relative to the
/// device: the frame target must be dropped before the `RenderContext`.
pub struct FrameTarget {
    channels: Channels,
    color_format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    color: ChannelTarget,
    /// Primitive, object, instance id targets; attached together whenever
    /// any id channel is declared so the pass layout matches the pipeline.
    ids: Option<[ChannelTarget; 3]>,
    completion_callback: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl FrameTarget {
    /// Create a frame target of the given size with the declared channels
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        channels: Channels,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        let color = create_channel(
            device,
            "channel.color",
            width,
            height,
            color_format,
            wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::TEXTURE_BINDING,
            channels.contains(Channels::COLOR),
        );

        let ids = channels.has_ids().then(|| {
            [
                (Channels::PRIMITIVE_ID, "channel.primitiveId"),
                (Channels::OBJECT_ID, "channel.objectId"),
                (Channels::INSTANCE_ID, "channel.instanceId"),
            ]
            .map(|(bit, label)| {
                create_channel(
                    device,
                    label,
                    width,
                    height,
                    wgpu::TextureFormat::R32Uint,
                    wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
                    channels.contains(bit),
                )
            })
        });

        Self {
            channels,
            color_format,
            width,
            height,
            color,
            ids,
            completion_callback: None,
        }
    }

    /// Recreate all channel resources at a new size
    ///
    /// Zero-sized requests are clamped to one pixel.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let next = FrameTarget::new(device, width, height, self.channels, self.color_format);
        let callback = self.completion_callback.take();
        *self = next;
        self.completion_callback = callback;
    }

    /// Register the advisory completion callback invoked after each render
    pub fn set_completion_callback(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        self.completion_callback = Some(Arc::new(callback));
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// The color texture view, for the presentation blit
    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.color.view
    }

    /// Render the mesh into all channels and copy declared channels to their
    /// readback buffers, in a single submission
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &ScenePipeline,
        mesh: &GpuMesh,
        background: wgpu::Color,
    ) -> wgpu::SubmissionIndex {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        let id_clear = wgpu::Color {
            r: INVALID_ID as f64,
            g: 0.0,
            b: 0.0,
            a: 0.0,
        };

        let mut attachments = vec![Some(wgpu::RenderPassColorAttachment {
            view: &self.color.view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(background),
                store: wgpu::StoreOp::Store,
            },
        })];
        if let Some(ids) = &self.ids {
            for target in ids {
                attachments.push(Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(id_clear),
                        store: wgpu::StoreOp::Store,
                    },
                }));
            }
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &attachments,
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pipeline.bind(&mut pass);
            mesh.draw(&mut pass);
        }

        self.encode_readback_copies(&mut encoder);

        let submission = queue.submit(std::iter::once(encoder.finish()));
        if let Some(callback) = &self.completion_callback {
            let callback = callback.clone();
            queue.on_submitted_work_done(move || callback());
        }
        submission
    }

    /// Block until the given submission has finished on the device
    pub fn wait(&self, device: &wgpu::Device, submission: wgpu::SubmissionIndex) {
        let _ = device.poll(wgpu::Maintain::WaitForSubmissionIndex(submission));
    }

    /// Map a declared channel for reading
    ///
    /// Returns `None` for channels that were not declared at creation, and on
    /// mapping failures (logged), rather than panicking.
    pub fn map<'a>(
        &'a self,
        device: &wgpu::Device,
        kind: ChannelKind,
    ) -> Option<MappedChannel<'a>> {
        let readback = self.target(kind)?.readback.as_ref()?;

        let slice = readback.slice(..);
        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device.poll(wgpu::Maintain::Wait);

        match pollster::block_on(rx.receive()) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                log::error!("mapping {:?} failed: {}", kind, e);
                return None;
            }
            None => return None,
        }

        let data = slice.get_mapped_range();
        Some(MappedChannel {
            buffer: readback,
            data: Some(data),
            width: self.width,
            height: self.height,
            bytes_per_row: padded_bytes_per_row(self.width),
        })
    }

    fn target(&self, kind: ChannelKind) -> Option<&ChannelTarget> {
        match kind {
            ChannelKind::Color => Some(&self.color),
            ChannelKind::PrimitiveId => self.ids.as_ref().map(|ids| &ids[0]),
            ChannelKind::ObjectId => self.ids.as_ref().map(|ids| &ids[1]),
            ChannelKind::InstanceId => self.ids.as_ref().map(|ids| &ids[2]),
        }
    }

    fn encode_readback_copies(&self, encoder: &mut wgpu::CommandEncoder) {
        let kinds = [
            ChannelKind::Color,
            ChannelKind::PrimitiveId,
            ChannelKind::ObjectId,
            ChannelKind::InstanceId,
        ];
        for kind in kinds {
            let Some(target) = self.target(kind) else {
                continue;
            };
            let Some(readback) = &target.readback else {
                continue;
            };
            encoder.copy_texture_to_buffer(
                wgpu::TexelCopyTextureInfo {
                    texture: &target.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                wgpu::TexelCopyBufferInfo {
                    buffer: readback,
                    layout: wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(padded_bytes_per_row(self.width)),
                        rows_per_image: Some(self.height),
                    },
                },
                wgpu::Extent3d {
                    width: self.width,
                    height: self.height,
                    depth_or_array_layers: 1,
                },
            );
        }
    }
}

/// Scoped read access to a mapped channel
///
/// The guard unmaps the readback buffer on drop; pixel data cannot be
/// retained past the guard's lifetime.
pub struct MappedChannel<'a> {
    buffer: &'a wgpu::Buffer,
    data: Option<wgpu::BufferView<'a>>,
    width: u32,
    height: u32,
    bytes_per_row: u32,
}

impl MappedChannel<'_> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes, including copy alignment padding
    pub fn bytes_per_row(&self) -> u32 {
        self.bytes_per_row
    }

    /// Raw mapped bytes, rows padded to the copy alignment
    pub fn data(&self) -> &[u8] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Read one pixel as a little-endian u32
    ///
    /// Works for both the packed RGBA color channel and the `R32Uint` id
    /// channels (4 bytes per pixel either way).
    pub fn pixel_u32(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.bytes_per_row + x * 4) as usize;
        let bytes = self.data().get(offset..offset + 4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

impl Drop for MappedChannel<'_> {
    fn drop(&mut self) {
        drop(self.data.take());
        self.buffer.unmap();
    }
}

fn create_channel(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
    declared: bool,
) -> ChannelTarget {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let readback = declared.then(|| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: padded_bytes_per_row(width) as u64 * height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        })
    });

    ChannelTarget {
        texture,
        view,
        readback,
    }
}

/// Bytes per row rounded up to the copy alignment wgpu requires
fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_masks_are_distinct() {
        let kinds = [
            ChannelKind::Color,
            ChannelKind::PrimitiveId,
            ChannelKind::ObjectId,
            ChannelKind::InstanceId,
        ];
        let mut seen = Channels::empty();
        for kind in kinds {
            assert!(!seen.intersects(kind.mask()));
            seen |= kind.mask();
        }
        assert_eq!(seen, Channels::all());
    }

    #[test]
    fn test_has_ids() {
        assert!(!Channels::COLOR.has_ids());
        assert!((Channels::COLOR | Channels::PRIMITIVE_ID).has_ids());
        assert!(Channels::INSTANCE_ID.has_ids());
    }

    #[test]
    fn test_padded_bytes_per_row() {
        // 640 * 4 = 2560, already a multiple of 256.
        assert_eq!(padded_bytes_per_row(640), 2560);
        // 641 * 4 = 2564 rounds up to the next 256 boundary.
        assert_eq!(padded_bytes_per_row(641), 2816);
        assert_eq!(padded_bytes_per_row(1), 256);
    }
}
