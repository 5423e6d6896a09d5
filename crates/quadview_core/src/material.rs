//! Matte material
//!
//! The only shading model in the demo. A material decides where the base
//! color of a surface comes from; lighting is a flat ambient term applied by
//! the renderer.

/// Where a matte material takes its base color from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSource {
    /// Use the mesh's per-vertex color attribute
    VertexColor,
    /// Use one fixed RGBA color for the whole surface
    Uniform([f32; 4]),
}

/// A matte (diffuse-only) material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: ColorSource,
}

impl Material {
    /// Matte material colored by the mesh's vertex color attribute
    pub fn matte_vertex_color() -> Self {
        Self {
            color: ColorSource::VertexColor,
        }
    }

    /// Matte material with a single fixed color
    pub fn matte(color: [f32; 4]) -> Self {
        Self {
            color: ColorSource::Uniform(color),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::matte_vertex_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_vertex_color() {
        assert_eq!(Material::default().color, ColorSource::VertexColor);
    }

    #[test]
    fn test_uniform_color() {
        let mat = Material::matte([0.2, 0.4, 0.6, 1.0]);
        assert_eq!(mat.color, ColorSource::Uniform([0.2, 0.4, 0.6, 1.0]));
    }
}
