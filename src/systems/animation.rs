//! Scene animation system
//!
//! Computes the per-frame scene mutations from elapsed wall-clock time:
//! two vertex colors oscillate, and the camera bobs along the Y axis. The
//! computations are pure so they can be tested without a clock.

use std::time::Instant;

/// Drives the time-based scene animation
pub struct AnimationSystem {
    start: Instant,
}

impl AnimationSystem {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since startup
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// New vertex colors for the quad at time `time`
    ///
    /// The red component of the first and last vertex oscillate in
    /// quadrature; the other vertices keep their initial colors.
    pub fn quad_colors(time: f32, mut colors: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
        colors[0][0] = time.sin();
        colors[3][0] = time.cos();
        colors
    }

    /// Camera position at time `time`: the base position bobbing on Y
    pub fn camera_position(time: f32, base: [f32; 3]) -> [f32; 3] {
        [base[0], base[1] + time.sin(), base[2]]
    }
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_COLORS: [[f32; 4]; 4] = [
        [0.9, 0.5, 0.5, 1.0],
        [0.8, 0.8, 0.8, 1.0],
        [0.8, 0.8, 0.8, 1.0],
        [0.5, 0.9, 0.5, 1.0],
    ];

    #[test]
    fn test_colors_at_time_zero() {
        let colors = AnimationSystem::quad_colors(0.0, BASE_COLORS);
        assert_eq!(colors[0][0], 0.0);
        assert_eq!(colors[3][0], 1.0);
        // Untouched components keep their values.
        assert_eq!(colors[0][1], 0.5);
        assert_eq!(colors[1], BASE_COLORS[1]);
        assert_eq!(colors[2], BASE_COLORS[2]);
    }

    #[test]
    fn test_colors_oscillate_in_quadrature() {
        let t = std::f32::consts::FRAC_PI_2;
        let colors = AnimationSystem::quad_colors(t, BASE_COLORS);
        assert!((colors[0][0] - 1.0).abs() < 1e-6);
        assert!(colors[3][0].abs() < 1e-6);
    }

    #[test]
    fn test_camera_bobs_on_y_only() {
        let base = [0.0, 0.0, 0.0];
        let pos = AnimationSystem::camera_position(std::f32::consts::FRAC_PI_2, base);
        assert_eq!(pos[0], 0.0);
        assert!((pos[1] - 1.0).abs() < 1e-6);
        assert_eq!(pos[2], 0.0);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let animation = AnimationSystem::new();
        let a = animation.elapsed();
        let b = animation.elapsed();
        assert!(b >= a);
    }
}
