//! Arrangement helpers

use crate::scene::{ObjectId, Scene};
use std::f32::consts::TAU;

/// Spread objects evenly around a ring in the XZ plane
///
/// Heights are left alone. Ids that are not in the scene are skipped but
/// still take up their slot on the ring.
pub fn position_in_circle(scene: &mut Scene, objects: &[ObjectId], radius: f32, start_angle: f32) {
    let count = objects.len();
    for (i, &id) in objects.iter().enumerate() {
        let angle = start_angle + i as f32 / count as f32 * TAU;
        if let Some(transform) = scene.transform_mut(id) {
            transform.position.x = angle.cos() * radius;
            transform.position.z = angle.sin() * radius;
        }
    }
}
