//! Lighting presets

use crate::lights::SceneLight;
use crate::scene::{Object3D, ObjectId, Scene};

/// Objects added by [`setup_cad_lighting`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CadLighting {
    pub ambient: ObjectId,
    pub key: ObjectId,
    pub fill: ObjectId,
}

/// Soft ambient fill, a key light from (5, 5, 5) and a dimmer fill from
/// the opposite corner. No shadows.
pub fn setup_cad_lighting(scene: &mut Scene) -> CadLighting {
    let ambient = scene.spawn_light(SceneLight::ambient(0.6), Object3D::new());
    let key = scene.spawn_light(SceneLight::directional(0.8), Object3D::at(5.0, 5.0, 5.0));
    let fill = scene.spawn_light(SceneLight::directional(0.3), Object3D::at(-5.0, -5.0, -5.0));
    for id in [ambient, key, fill] {
        scene.add(id);
    }
    CadLighting { ambient, key, fill }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lights::LightKind;

    #[test]
    fn test_three_light_rig() {
        let mut scene = Scene::new();
        let rig = setup_cad_lighting(&mut scene);
        let lights = scene.lights();
        assert_eq!(lights.len(), 3);
        assert_eq!(lights[0].1.kind, LightKind::Ambient);
        assert!(lights[1].1.is_directional());
        assert!(lights[2].1.intensity < lights[1].1.intensity);
        assert_eq!(scene.transform(rig.fill).map(|t| t.position.x), Some(-5.0));
    }
}
