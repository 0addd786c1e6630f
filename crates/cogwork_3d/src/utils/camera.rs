//! Camera presets

use crate::scene::PerspectiveCamera;
use cogwork_core::Vec3;

/// Default oblique offset of the diagram camera
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);

/// Perspective camera at an oblique offset, aimed at the origin
///
/// 45 degree vertical field of view, clip planes at 0.1 and 1000. This only
/// approximates an isometric view; the projection is still perspective.
pub fn setup_isometric_camera(aspect: f32, position: Vec3) -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::new(45f32.to_radians(), aspect, 0.1, 1000.0)
        .with_position(position);
    camera.look_at(Vec3::ZERO);
    camera
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isometric_camera() {
        let camera = setup_isometric_camera(2.0, DEFAULT_CAMERA_POSITION);
        assert!((camera.fov - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert_eq!((camera.near, camera.far), (0.1, 1000.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.aspect, 2.0);
    }
}
