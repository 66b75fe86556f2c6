//! 4x4 transformation matrices and rotation state.
//!
//! Matrices act on column vectors (`m * v`), so a translation sits in the
//! last column and `a * b` applies `b` first.
use crate::error::{GeometryError, Result};
use crate::matrix::Matrix4;
use crate::vector::{Vector3, Vector4};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn rotation_x(angle: f64) -> Matrix4 {
        let (s, c) = angle.sin_cos();
        Matrix4::from_grid([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle: f64) -> Matrix4 {
        let (s, c) = angle.sin_cos();
        Matrix4::from_grid([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle: f64) -> Matrix4 {
        let (s, c) = angle.sin_cos();
        Matrix4::from_grid([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4 {
        let rx = Self::rotation_x(rotation.x);
        let ry = Self::rotation_y(rotation.y);
        let rz = Self::rotation_z(rotation.z);

        // Apply rotations in order: Z, Y, X
        rz * ry * rx
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4 {
        Matrix4::from_grid([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4 {
        Matrix4::from_grid([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Perspective projection; `fov_degrees` is the vertical field of view.
    ///
    /// The projected `w` equals the input `z`, so [`Transform::apply_point`]
    /// performs the perspective divide.
    pub fn projection_matrix(
        width: u32,
        height: u32,
        fov_degrees: f64,
        z_near: f64,
        z_far: f64,
    ) -> Result<Matrix4> {
        if width == 0 || height == 0 {
            return Err(GeometryError::value_error(format!(
                "screen size must be positive, got {width}x{height}"
            )));
        }
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(GeometryError::value_error(format!(
                "field of view must lie in (0, 180) degrees, got {fov_degrees}"
            )));
        }
        if !(z_near >= 0.0 && z_far > z_near) {
            return Err(GeometryError::value_error(format!(
                "clip planes must satisfy 0 <= near < far, got {z_near} and {z_far}"
            )));
        }

        let aspect = f64::from(height) / f64::from(width);
        let focal = 1.0 / (fov_degrees.to_radians() * 0.5).tan();
        let q = z_far / (z_far - z_near);

        Ok(Matrix4::from_grid([
            [aspect * focal, 0.0, 0.0, 0.0],
            [0.0, focal, 0.0, 0.0],
            [0.0, 0.0, q, -z_near * q],
            [0.0, 0.0, 1.0, 0.0],
        ]))
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(model: &Matrix4, view: &Matrix4, projection: &Matrix4) -> Matrix4 {
        *projection * *view * *model
    }

    /// Transform a point (w = 1), dividing by the resulting w unless it is 0 or 1.
    pub fn apply_point(m: &Matrix4, point: &Vector3) -> Vector3 {
        let h = *m * Vector4::xyzw(point.x(), point.y(), point.z(), 1.0);
        let w = h.w();
        if w == 0.0 || w == 1.0 {
            Vector3::xyz(h.x(), h.y(), h.z())
        } else {
            Vector3::xyz(h.x() / w, h.y() / w, h.z() / w)
        }
    }
}
