//! Transform builders and the [`Transform`] component.
//!
//! All builders return row-vector matrices (see [`crate::math::mat4`]); angles
//! are given in degrees.

use crate::math::{Mat4, Vector};

/// Uniform scale.
pub fn scale(factor: f64) -> Mat4 {
    Mat4::scaling(factor, factor, factor)
}

/// Rotation around the X axis (degrees).
pub fn rotate_x(degrees: f64) -> Mat4 {
    Mat4::rotation_x(degrees.to_radians())
}

/// Rotation around the Y axis (degrees).
pub fn rotate_y(degrees: f64) -> Mat4 {
    Mat4::rotation_y(degrees.to_radians())
}

/// Rotation around the Z axis (degrees).
pub fn rotate_z(degrees: f64) -> Mat4 {
    Mat4::rotation_z(degrees.to_radians())
}

/// Translation by the coordinates of `offset`.
pub fn translate(offset: Vector) -> Mat4 {
    Mat4::translation(offset.x, offset.y, offset.z)
}

/// Maps world space into the frame of a camera at `eye` looking at the origin.
///
/// The camera looks down its own -Z axis, so everything in front of it ends up
/// with negative z. The frame is derived from the spherical angles of `eye`.
///
/// # Panics
/// Panics when `eye` is the origin.
pub fn eye_point(eye: Vector) -> Mat4 {
    let r = eye.to_direction().length();
    assert!(r > 0.0, "eye point must not coincide with the origin");
    let theta = eye.y.atan2(eye.x);
    let phi = (eye.z / r).clamp(-1.0, 1.0).acos();

    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();

    Mat4::new([
        [-sin_t, -cos_t * cos_p, cos_t * sin_p, 0.0],
        [cos_t, -sin_t * cos_p, sin_t * sin_p, 0.0],
        [0.0, sin_p, cos_p, 0.0],
        [0.0, 0.0, -r, 1.0],
    ])
}

/// A 3D transform with position, rotation (Euler angles in degrees), and scale.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(5.0, 2.0, 0.0)
///     .rotate_y(90.0)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vector,
    rotation: Vector,
    scale: Vector,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector::ORIGIN,
            rotation: Vector::ZERO,
            scale: Vector::direction(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, rotation=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn set_position(&mut self, position: Vector) -> &mut Self {
        self.position = position.to_point();
        self
    }

    pub fn set_position_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.position = Vector::point(x, y, z);
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vector) -> &mut Self {
        self.position = self.position + delta.to_direction();
        self
    }

    // ============ Rotation ============

    /// Get the rotation (Euler angles in degrees).
    pub fn rotation(&self) -> Vector {
        self.rotation
    }

    pub fn set_rotation_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.rotation = Vector::direction(x, y, z);
        self
    }

    pub fn rotate_x(&mut self, degrees: f64) -> &mut Self {
        self.rotation.x += degrees;
        self
    }

    pub fn rotate_y(&mut self, degrees: f64) -> &mut Self {
        self.rotation.y += degrees;
        self
    }

    pub fn rotate_z(&mut self, degrees: f64) -> &mut Self {
        self.rotation.z += degrees;
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> Vector {
        self.scale
    }

    pub fn set_scale_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.scale = Vector::direction(x, y, z);
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f64) -> &mut Self {
        self.scale = Vector::direction(s, s, s);
        self
    }

    // ============ Matrix Generation ============

    /// Generate the transformation matrix.
    ///
    /// Order: Scale * RotationX * RotationY * RotationZ * Translation
    /// (scale applied first, then rotations, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
            * rotate_x(self.rotation.x)
            * rotate_y(self.rotation.y)
            * rotate_z(self.rotation.z)
            * translate(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vector::ORIGIN);
        assert_eq!(t.rotation(), Vector::ZERO);
        assert_eq!(t.scale(), Vector::direction(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 2.0, 3.0)
            .rotate_y(45.0)
            .set_scale_uniform(2.0);

        assert_eq!(t.position(), Vector::point(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 45.0);
        assert_eq!(t.scale(), Vector::direction(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_to_matrix_identity() {
        assert_eq!(Transform::default().to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_scale_then_translate() {
        let mut t = Transform::new();
        t.set_scale_uniform(2.0).set_position_xyz(0.0, 0.0, 5.0);
        let p = Vector::point(1.0, 0.0, 0.0) * t.to_matrix();
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn eye_point_places_origin_in_front() {
        let eye = eye_point(Vector::point(3.0, -4.0, 5.0));
        let origin = Vector::ORIGIN * eye;
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(origin.z, -(50.0f64).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn eye_point_maps_eye_to_camera_origin() {
        let eye_pos = Vector::point(2.0, 6.0, -1.0);
        let camera = eye_pos * eye_point(eye_pos);
        assert_relative_eq!(camera.length(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn eye_point_is_a_rotation_plus_translation() {
        let eye = eye_point(Vector::point(1.0, 2.0, 3.0));
        let d = Vector::direction(0.3, -0.2, 0.9);
        assert_relative_eq!((d * eye).length(), d.length(), epsilon = 1e-12);
    }
}
