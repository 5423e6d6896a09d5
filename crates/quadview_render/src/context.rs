//! WGPU device, queue, and surface management
//!
//! The context owns every wgpu core object. All other GPU resources are
//! created through it and must be dropped before it.

use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

bitflags::bitflags! {
    /// Capabilities the demo probes at startup
    ///
    /// Missing capabilities are reported as warnings and never abort startup.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DeviceCapabilities: u32 {
        /// Indexed drawing with the full 32-bit index range
        const INDEXED_TRIANGLES = 1 << 0;
        /// An sRGB color format is available for the surface
        const SRGB_SURFACE = 1 << 1;
        /// Enough color attachments for the color plus three id channels
        const ID_CHANNELS = 1 << 2;
        /// Mailbox presentation (low-latency vsync-off swapping)
        const MAILBOX_PRESENT = 1 << 3;
    }
}

/// Context creation error
#[derive(Debug)]
pub enum ContextError {
    /// No suitable GPU adapter was found
    NoAdapter,
    /// The surface could not be created for the window
    SurfaceCreation(String),
    /// The adapter refused to create a device
    DeviceCreation(String),
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::NoAdapter => write!(f, "no suitable GPU adapter found"),
            ContextError::SurfaceCreation(msg) => write!(f, "surface creation failed: {}", msg),
            ContextError::DeviceCreation(msg) => write!(f, "device creation failed: {}", msg),
        }
    }
}

impl std::error::Error for ContextError {}

/// Owns the wgpu instance, adapter, device, queue, and window surface
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    capabilities: DeviceCapabilities,
}

impl RenderContext {
    /// Create a context with vsync enabled
    pub async fn new(window: Arc<Window>) -> Result<Self, ContextError> {
        Self::with_vsync(window, true).await
    }

    /// Create a context bound to the window
    pub async fn with_vsync(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| ContextError::SurfaceCreation(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("quadview device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| ContextError::DeviceCreation(e.to_string()))?;

        install_error_hook(&device);

        let surface_caps = surface.get_capabilities(&adapter);
        let capabilities = probe_capabilities(&adapter, &surface_caps);

        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            capabilities,
        })
    }

    /// Capabilities probed at creation
    pub fn capabilities(&self) -> DeviceCapabilities {
        self.capabilities
    }

    /// Log one warning per missing capability
    pub fn log_capability_warnings(&self) {
        let caps = self.capabilities;
        if !caps.contains(DeviceCapabilities::INDEXED_TRIANGLES) {
            log::warn!("device doesn't support full 32-bit indexed triangle drawing");
        }
        if !caps.contains(DeviceCapabilities::SRGB_SURFACE) {
            log::warn!("device doesn't support an sRGB surface format");
        }
        if !caps.contains(DeviceCapabilities::ID_CHANNELS) {
            log::warn!("device doesn't support enough color attachments for id channels");
        }
        if !caps.contains(DeviceCapabilities::MAILBOX_PRESENT) {
            log::info!("device doesn't support mailbox presentation");
        }
    }

    /// Reconfigure the surface after a resize
    ///
    /// Zero-sized requests (minimized window) update internal state only;
    /// reconfiguration happens on the next non-zero resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Width over height of the current surface
    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }
}

fn probe_capabilities(
    adapter: &wgpu::Adapter,
    surface_caps: &wgpu::SurfaceCapabilities,
) -> DeviceCapabilities {
    let mut caps = DeviceCapabilities::empty();

    if adapter
        .get_downlevel_capabilities()
        .flags
        .contains(wgpu::DownlevelFlags::FULL_DRAW_INDEX_UINT32)
    {
        caps |= DeviceCapabilities::INDEXED_TRIANGLES;
    }
    if surface_caps.formats.iter().any(|f| f.is_srgb()) {
        caps |= DeviceCapabilities::SRGB_SURFACE;
    }
    // One color channel plus primitive/object/instance id channels.
    if adapter.limits().max_color_attachments >= 4 {
        caps |= DeviceCapabilities::ID_CHANNELS;
    }
    if surface_caps
        .present_modes
        .contains(&wgpu::PresentMode::Mailbox)
    {
        caps |= DeviceCapabilities::MAILBOX_PRESENT;
    }

    caps
}

/// Route uncaptured device errors to the log with a severity tag
///
/// The demo is best-effort: backend errors are reported, never fatal here.
/// Out-of-memory is surfaced separately through the surface error path.
fn install_error_hook(device: &wgpu::Device) {
    device.on_uncaptured_error(Box::new(|error| match error {
        wgpu::Error::OutOfMemory { .. } => {
            log::error!("[FATAL] device out of memory");
        }
        wgpu::Error::Validation { description, .. } => {
            log::error!("[ERROR] validation: {}", description);
        }
        _ => {
            log::warn!("[WARN ] internal device error: {}", error);
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_flags_are_distinct() {
        let all = DeviceCapabilities::all();
        assert!(all.contains(DeviceCapabilities::INDEXED_TRIANGLES));
        assert!(all.contains(DeviceCapabilities::SRGB_SURFACE));
        assert!(all.contains(DeviceCapabilities::ID_CHANNELS));
        assert!(all.contains(DeviceCapabilities::MAILBOX_PRESENT));
        assert_eq!(all.bits().count_ones(), 4);
    }

    #[test]
    fn test_context_error_display() {
        assert_eq!(
            format!("{}", ContextError::NoAdapter),
            "no suitable GPU adapter found"
        );
        assert!(format!("{}", ContextError::DeviceCreation("x".into())).contains("x"));
    }
}
