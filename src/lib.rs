//! quadview - windowed demo of an animated, vertex-colored quad
//!
//! The application opens a window, renders a two-triangle quad into an
//! offscreen frame target (color plus primitive/object/instance id channels),
//! copies the color image onto the window every frame, and animates the
//! vertex colors and the camera until the window is closed.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
