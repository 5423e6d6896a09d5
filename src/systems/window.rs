//! Window management system
//!
//! Handles window creation, key handling, the close-request flag, and the
//! per-frame framebuffer-size query.

use std::sync::Arc;
use winit::{
    dpi::PhysicalSize,
    event::ElementState,
    event_loop::ActiveEventLoop,
    keyboard::KeyCode,
    window::Window,
};

use crate::config::WindowConfig;
use crate::input::{InputAction, InputMapper};

/// Manages the application window and close state
pub struct WindowSystem {
    window: Arc<Window>,
    close_requested: bool,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        log::info!("Creating a window");
        let attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            close_requested: false,
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Handle a key event
    ///
    /// Escape raises the close request; every other key is logged only.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        match InputMapper::map_keyboard(key, state) {
            Some(InputAction::Exit) => {
                log::info!("Escape pressed, closing window");
                self.request_close();
            }
            None => {
                if state == ElementState::Pressed {
                    log::debug!("Unhandled key: {:?}", key);
                }
            }
        }
    }

    /// Raise the close request; the render loop polls it to terminate
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Whether a close was requested (by key or by the window system)
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Current framebuffer size in physical pixels
    ///
    /// Queried once per loop iteration; it changes when the user resizes the
    /// window.
    pub fn framebuffer_size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(format!("{}", err), "Window creation failed: no display");
    }
}
