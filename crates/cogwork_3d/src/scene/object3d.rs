//! Object transforms

use crate::math::Mat4Ext;
use cogwork_core::{Mat4, Vec3};

/// Local transform and visibility of a scene object
///
/// Rotation is stored as Euler angles in radians, applied in XYZ order, so
/// spinning an object about one axis is a single field update.
#[derive(Clone, Debug, PartialEq)]
pub struct Object3D {
    /// Local position relative to parent
    pub position: Vec3,
    /// Local rotation (Euler XYZ, radians)
    pub rotation: Vec3,
    /// Local scale
    pub scale: Vec3,
    /// Visibility flag
    pub visible: bool,
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            visible: true,
        }
    }
}

impl Object3D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with position
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set rotation from Euler angles (radians)
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }

    /// Compute local transformation matrix
    pub fn local_matrix(&self) -> Mat4 {
        let translation = <Mat4 as Mat4Ext>::from_translation(self.position);
        let rotation = <Mat4 as Mat4Ext>::from_euler_xyz(self.rotation);
        let scale = <Mat4 as Mat4Ext>::from_scale(self.scale);
        translation.mul(&rotation).mul(&scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_local_matrix_scales_rotates_then_translates() {
        let object = Object3D::at(1.0, 0.0, 0.0)
            .with_rotation(0.0, 0.0, FRAC_PI_2)
            .with_uniform_scale(2.0);
        let p = object.local_matrix().transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }
}
