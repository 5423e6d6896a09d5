//! Perspective camera
//!
//! The camera is parameterized the way the render loop drives it: position,
//! view direction, up vector, and projection settings. `view_proj` produces
//! the matrix uploaded to the scene uniforms.

/// Perspective camera with position/direction/up parameterization
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Width over height of the output image
    pub aspect: f32,
}

impl Camera {
    pub fn new(position: [f32; 3], direction: [f32; 3], up: [f32; 3], aspect: f32) -> Self {
        Self {
            position,
            direction,
            up,
            fov_y: std::f32::consts::FRAC_PI_3,
            near: 0.1,
            far: 100.0,
            aspect,
        }
    }

    pub fn with_projection(mut self, fov_y: f32, near: f32, far: f32) -> Self {
        self.fov_y = fov_y;
        self.near = near;
        self.far = far;
        self
    }

    /// Combined view-projection matrix (column-major, ready for the shader)
    pub fn view_proj(&self) -> [[f32; 4]; 4] {
        let target = [
            self.position[0] + self.direction[0],
            self.position[1] + self.direction[1],
            self.position[2] + self.direction[2],
        ];
        let view = look_at_matrix(self.position, target, self.up);
        let proj = perspective_matrix(self.fov_y, self.aspect, self.near, self.far);
        mat4_mul(view, proj)
    }
}

/// Helper to create a perspective projection matrix
pub fn perspective_matrix(fov_y: f32, aspect: f32, near: f32, far: f32) -> [[f32; 4]; 4] {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * nf, -1.0],
        [0.0, 0.0, 2.0 * far * near * nf, 0.0],
    ]
}

/// Helper to create a look-at view matrix
pub fn look_at_matrix(eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> [[f32; 4]; 4] {
    let f = normalize([
        target[0] - eye[0],
        target[1] - eye[1],
        target[2] - eye[2],
    ]);
    let s = normalize(cross(f, up));
    let u = cross(s, f);

    [
        [s[0], u[0], -f[0], 0.0],
        [s[1], u[1], -f[1], 0.0],
        [s[2], u[2], -f[2], 0.0],
        [-dot(s, eye), -dot(u, eye), dot(f, eye), 1.0],
    ]
}

/// Multiply two 4x4 matrices
pub fn mat4_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut result = [[0.0f32; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            result[i][j] =
                a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j] + a[i][3] * b[3][j];
        }
    }
    result
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perspective_matrix() {
        let proj = perspective_matrix(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0);
        assert!(proj[0][0] != 0.0);
        assert!(proj[1][1] != 0.0);
    }

    #[test]
    fn test_look_at_identity_direction() {
        // Eye at origin looking down -Z with +Y up is the identity view.
        let view = look_at_matrix([0.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]);
        for (i, row) in view.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-6, "view[{}][{}] = {}", i, j, v);
            }
        }
    }

    #[test]
    fn test_view_proj_centers_forward_point() {
        // A point straight ahead of the camera lands on the image center.
        let camera = Camera::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0], 1.0);
        let vp = camera.view_proj();
        let p = [0.0f32, 0.0, 3.0, 1.0];
        let mut clip = [0.0f32; 4];
        for j in 0..4 {
            clip[j] = p[0] * vp[0][j] + p[1] * vp[1][j] + p[2] * vp[2][j] + p[3] * vp[3][j];
        }
        assert!((clip[0] / clip[3]).abs() < 1e-6);
        assert!((clip[1] / clip[3]).abs() < 1e-6);
    }
}
