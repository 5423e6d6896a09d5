//! Scene construction utilities
//!
//! This module provides a declarative API for building the demo scene.

mod scene_builder;

pub use scene_builder::{
    DemoScene, SceneBuilder, QUAD_COLORS, QUAD_INDICES, QUAD_POSITIONS, SURFACE_ID, WORLD_ID,
};
