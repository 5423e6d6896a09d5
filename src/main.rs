//! quadview - windowed demo of an animated, vertex-colored quad
//!
//! Opens a 640x480 window, renders the demo scene through the GPU every
//! frame, and animates the quad colors and the camera until the window is
//! closed or Escape is pressed.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use quadview::config::AppConfig;
use quadview::scene::QUAD_COLORS;
use quadview::systems::{AnimationSystem, RenderError, RenderSystem, WindowSystem};

/// Main application state
///
/// Field order fixes drop order: the render system (and with it the surface)
/// goes away before the window it draws to.
struct App {
    config: AppConfig,
    render: Option<RenderSystem>,
    window: Option<WindowSystem>,
    animation: AnimationSystem,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            render: None,
            window: None,
            animation: AnimationSystem::new(),
        }
    }

    /// One loop iteration: poll size, animate, commit, render, present
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        if window.close_requested() {
            event_loop.exit();
            return;
        }
        let Some(render) = &mut self.render else {
            return;
        };

        let time = self.animation.elapsed();

        // Poll the framebuffer size; a user resize must reach the frame
        // target before the next render.
        render.update_frame_size(window.framebuffer_size());

        render.update_mesh_colors(AnimationSystem::quad_colors(time, QUAD_COLORS));
        render.update_camera(
            AnimationSystem::camera_position(time, self.config.camera.position),
            self.config.camera.up,
            self.config.camera.direction,
        );

        render.render_frame();

        match render.present() {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                log::warn!("Surface lost, reconfiguring");
                render.resize_surface(window.framebuffer_size());
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("Present failed: {}", e),
        }

        if self.config.debug.id_probe {
            render.probe_center_ids();
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => {
                match RenderSystem::new(window.window().clone(), &self.config) {
                    Ok(render) => self.render = Some(render),
                    Err(e) => log::error!("Cannot initialize renderer, err={}", e),
                }
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                // Keep running without a window; the loop never renders.
                log::error!("Cannot create a window, err={}", e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(window) = &mut self.window {
                    window.request_close();
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize_surface(size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(window) = &mut self.window {
                        window.handle_key(key, event.state);
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting quadview");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");

    log::info!("quadview exited");
}
