//! Camera

use crate::math::Mat4Ext;
use cogwork_core::{Mat4, Vec3};

/// Perspective camera for 3D rendering
///
/// Like Three.js, the projection matrix is cached; call
/// [`update_projection_matrix`](Self::update_projection_matrix) after
/// changing `fov`, `aspect`, `near` or `far`.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in radians
    pub fov: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            projection: <Mat4 as Mat4Ext>::perspective_rh(fov, aspect, near, far),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Aim the camera at a point
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Recompute the cached projection from the current parameters
    pub fn update_projection_matrix(&mut self) {
        self.projection = <Mat4 as Mat4Ext>::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        <Mat4 as Mat4Ext>::look_at_rh(self.position, self.target, self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_is_cached_until_updated() {
        let mut camera = PerspectiveCamera::new(1.0, 1.0, 0.1, 100.0);
        let before = camera.projection_matrix();
        camera.aspect = 2.0;
        assert_eq!(camera.projection_matrix(), before);
        camera.update_projection_matrix();
        let after = camera.projection_matrix();
        assert!((after.cols[0][0] * 2.0 - before.cols[0][0]).abs() < 1e-6);
    }
}
