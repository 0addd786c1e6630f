//! Math extension methods for cogwork_core types
//!
//! Projection and view matrices needed for 3D rendering that the core
//! value types do not carry.

use cogwork_core::{Mat4, Vec3};

/// Extension trait for Mat4
pub trait Mat4Ext {
    /// Create a translation matrix
    fn from_translation(v: Vec3) -> Mat4;
    /// Create a scale matrix
    fn from_scale(v: Vec3) -> Mat4;
    /// Rotation from Euler angles (radians) applied in XYZ order
    fn from_euler_xyz(angles: Vec3) -> Mat4;
    /// Create a perspective projection matrix (right-handed, depth 0 to 1)
    fn perspective_rh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;
    /// Create a look-at view matrix (right-handed)
    fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn from_translation(v: Vec3) -> Mat4 {
        Mat4::translation(v.x, v.y, v.z)
    }

    fn from_scale(v: Vec3) -> Mat4 {
        Mat4::scale(v.x, v.y, v.z)
    }

    fn from_euler_xyz(angles: Vec3) -> Mat4 {
        Mat4::rotation_x(angles.x)
            .mul(&Mat4::rotation_y(angles.y))
            .mul(&Mat4::rotation_z(angles.z))
    }

    fn perspective_rh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let h = 1.0 / (fov_y * 0.5).tan();
        let w = h / aspect;
        let r = far / (near - far);

        Mat4 {
            cols: [
                [w, 0.0, 0.0, 0.0],
                [0.0, h, 0.0, 0.0],
                [0.0, 0.0, r, -1.0],
                [0.0, 0.0, near * r, 0.0],
            ],
        }
    }

    fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let f = (target - eye).normalize();
        let s = {
            let s = f.cross(up).normalize();
            if s == Vec3::ZERO {
                Vec3::new(1.0, 0.0, 0.0)
            } else {
                s
            }
        };
        let u = s.cross(f);

        Mat4 {
            cols: [
                [s.x, u.x, -f.x, 0.0],
                [s.y, u.y, -f.y, 0.0],
                [s.z, u.z, -f.z, 0.0],
                [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_moves_target_onto_view_axis() {
        let eye = Vec3::new(10.0, 10.0, 10.0);
        let view = <Mat4 as Mat4Ext>::look_at_rh(eye, Vec3::ZERO, Vec3::UP);
        let origin = view.transform_point(Vec3::ZERO);
        // Right-handed view space looks down -Z
        assert!(origin.x.abs() < 1e-4);
        assert!(origin.y.abs() < 1e-4);
        assert!((origin.z + eye.length()).abs() < 1e-4);
    }

    #[test]
    fn test_look_at_keeps_handedness() {
        let view = <Mat4 as Mat4Ext>::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::UP);
        let right = view.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!((right.x - 1.0).abs() < 1e-5);
        assert!(right.y.abs() < 1e-5);
        assert!((right.z + 10.0).abs() < 1e-5);

        let above = view.transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert!((above.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_basis_is_right_handed() {
        let view = <Mat4 as Mat4Ext>::look_at_rh(Vec3::new(10.0, 10.0, 10.0), Vec3::ZERO, Vec3::UP);
        let x = Vec3::new(view.cols[0][0], view.cols[1][0], view.cols[2][0]);
        let y = Vec3::new(view.cols[0][1], view.cols[1][1], view.cols[2][1]);
        let z = Vec3::new(view.cols[0][2], view.cols[1][2], view.cols[2][2]);
        let det = x.cross(y).dot(z);
        assert!((det - 1.0).abs() < 1e-4, "{det}");
    }

    #[test]
    fn test_euler_order_matches_single_axis() {
        let m = <Mat4 as Mat4Ext>::from_euler_xyz(Vec3::new(0.0, 0.0, 0.7));
        assert_eq!(m, Mat4::rotation_z(0.7));
    }
}
