//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene setup (camera, quad surface, world) and GPU upload
//! - Frame target with color and id channels
//! - Per-frame commit / render / wait / present

use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use quadview_render::{
    BlitPipeline, Camera, ChannelKind, Channels, FrameTarget, GpuMesh, MappedChannel,
    RenderContext, ScenePipeline, SceneUniforms,
};

use crate::config::{AppConfig, CameraConfig, RenderingConfig};
use crate::scene::{DemoScene, SceneBuilder};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Device or surface initialization failed
    Init(String),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Init(msg) => write!(f, "Initialization failed: {}", msg),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Manages GPU rendering
///
/// Field order fixes drop order: everything created through the device drops
/// before the context.
pub struct RenderSystem {
    frame: FrameTarget,
    blit_bind_group: wgpu::BindGroup,
    blit_pipeline: BlitPipeline,
    scene_pipeline: ScenePipeline,
    quad_gpu: GpuMesh,
    scene: DemoScene,
    camera: Camera,
    rendering: RenderingConfig,
    context: RenderContext,
}

impl RenderSystem {
    /// Initialize the device, build the scene, and configure the frame target
    pub fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self, RenderError> {
        log::info!("Initializing rendering device");
        let context = pollster::block_on(RenderContext::with_vsync(window, config.window.vsync))
            .map_err(|e| RenderError::Init(e.to_string()))?;
        context.log_capability_warnings();

        let scene_pipeline = ScenePipeline::new(
            &context.device,
            context.config.format,
            config.rendering.id_channels,
        );
        let blit_pipeline = BlitPipeline::new(&context.device, context.config.format);

        let (scene, camera, quad_gpu) = Self::create_scene(&context, &config.camera);
        let (frame, blit_bind_group) =
            Self::setup_frame(&context, &blit_pipeline, config.rendering.id_channels);

        let system = Self {
            frame,
            blit_bind_group,
            blit_pipeline,
            scene_pipeline,
            quad_gpu,
            scene,
            camera,
            rendering: config.rendering.clone(),
            context,
        };
        system.commit_uniforms();
        Ok(system)
    }

    /// Build the static scene and upload its mesh
    fn create_scene(context: &RenderContext, config: &CameraConfig) -> (DemoScene, Camera, GpuMesh) {
        log::info!("Setting up scene");
        let scene = SceneBuilder::new().add_quad().build();
        let surface = scene.quad_surface();
        let quad_gpu = GpuMesh::new(&context.device, surface.mesh(), surface.material());

        let camera = Camera::new(
            config.position,
            config.direction,
            config.up,
            context.aspect_ratio(),
        )
        .with_projection(config.fov.to_radians(), config.near, config.far);

        log::info!(
            "Scene ready: {} surface(s), {} triangles",
            scene.world.surface_count(),
            quad_gpu.triangle_count()
        );
        (scene, camera, quad_gpu)
    }

    /// Create the frame target and declare its output channels
    fn setup_frame(
        context: &RenderContext,
        blit_pipeline: &BlitPipeline,
        id_channels: bool,
    ) -> (FrameTarget, wgpu::BindGroup) {
        log::info!("Setting up frame target");
        let mut channels = Channels::COLOR;
        if id_channels {
            channels |= Channels::PRIMITIVE_ID | Channels::OBJECT_ID | Channels::INSTANCE_ID;
        }

        let mut frame = FrameTarget::new(
            &context.device,
            context.config.width,
            context.config.height,
            channels,
            context.config.format,
        );
        frame.set_completion_callback(|| log::debug!("Device finished rendering frame"));

        let blit_bind_group = blit_pipeline.create_bind_group(&context.device, frame.color_view());
        (frame, blit_bind_group)
    }

    /// Reconfigure the window surface (resize event)
    pub fn resize_surface(&mut self, size: PhysicalSize<u32>) {
        self.context.resize(size);
    }

    /// Track the polled framebuffer size; recreates the frame target when it
    /// changed since the last frame
    pub fn update_frame_size(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        if self.frame.size() == (size.width, size.height) {
            return;
        }
        self.frame.resize(&self.context.device, size.width, size.height);
        self.blit_bind_group = self
            .blit_pipeline
            .create_bind_group(&self.context.device, self.frame.color_view());
    }

    /// Move the camera and commit the change
    pub fn update_camera(&mut self, position: [f32; 3], up: [f32; 3], direction: [f32; 3]) {
        self.camera.position = position;
        self.camera.up = up;
        self.camera.direction = direction;
        self.commit_uniforms();
    }

    /// Overwrite the quad's vertex colors and commit the change
    pub fn update_mesh_colors(&mut self, colors: [[f32; 4]; 4]) {
        let surface = self.scene.quad_surface_mut();
        for (vertex, color) in colors.iter().enumerate() {
            surface.mesh_mut().set_vertex_color(vertex, *color);
        }
        let surface = self.scene.quad_surface();
        self.quad_gpu
            .write_colors(&self.context.queue, surface.mesh(), surface.material());
    }

    /// Render one frame into the frame target and block until it finished
    ///
    /// Exactly one submission and one matching wait per call.
    pub fn render_frame(&self) {
        let bg = &self.rendering.background_color;
        let submission = self.frame.render(
            &self.context.device,
            &self.context.queue,
            &self.scene_pipeline,
            &self.quad_gpu,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        );
        self.frame.wait(&self.context.device, submission);
    }

    /// Copy the rendered color image into the window backbuffer and present
    pub fn present(&mut self) -> Result<(), RenderError> {
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });
        self.blit_pipeline
            .encode(&mut encoder, &view, &self.blit_bind_group);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Scoped read access to a rendered channel
    ///
    /// `None` for channels that were not declared on the frame target.
    pub fn map_channel(&self, kind: ChannelKind) -> Option<MappedChannel<'_>> {
        self.frame.map(&self.context.device, kind)
    }

    /// Log the id channels' values under the center pixel
    pub fn probe_center_ids(&self) {
        let (width, height) = self.frame.size();
        let (x, y) = (width / 2, height / 2);
        log::debug!("Checking id buffers @ [{}, {}]:", x, y);

        let probes = [
            (ChannelKind::PrimitiveId, "primId"),
            (ChannelKind::ObjectId, "objId"),
            (ChannelKind::InstanceId, "instId"),
        ];
        for (kind, label) in probes {
            match self.map_channel(kind) {
                Some(mapped) => {
                    if let Some(value) = mapped.pixel_u32(x, y) {
                        log::debug!("    {}: {}", label, value);
                    }
                }
                None => log::debug!("    {}: channel not declared", label),
            }
        }
    }

    /// Current frame target size
    pub fn size(&self) -> (u32, u32) {
        self.frame.size()
    }

    /// Upload camera and renderer parameters; the commit for both
    fn commit_uniforms(&self) {
        let uniforms = SceneUniforms {
            view_proj: self.camera.view_proj(),
            ambient_radiance: self.rendering.ambient_radiance,
            object_id: self.scene.quad_surface().id(),
            instance_id: self.scene.world.id(),
            _padding: 0,
        };
        self.scene_pipeline
            .update_uniforms(&self.context.queue, &uniforms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
        assert!(format!("{}", RenderError::Init("no adapter".to_string())).contains("no adapter"));
    }
}
