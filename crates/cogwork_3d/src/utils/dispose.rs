//! Recursive resource release

use crate::materials::Material;
use crate::scene::{ObjectId, Scene};
use std::ops::AddAssign;

/// What a call to [`dispose_object`] released
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisposeReport {
    pub objects: usize,
    pub geometries: usize,
    pub materials: usize,
    pub textures: usize,
}

impl DisposeReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AddAssign for DisposeReport {
    fn add_assign(&mut self, rhs: Self) {
        self.objects += rhs.objects;
        self.geometries += rhs.geometries;
        self.materials += rhs.materials;
        self.textures += rhs.textures;
    }
}

/// Release an object, its descendants and everything they reference
///
/// Walks the subtree children first, disposing each mesh's geometry, its
/// materials and any textures bound to those materials, then detaches the
/// root from its parent. Shared resources are released once; ids that no
/// longer exist are skipped, so calling this twice is harmless.
pub fn dispose_object(scene: &mut Scene, root: ObjectId) -> DisposeReport {
    let mut report = DisposeReport::default();
    if !scene.contains(root) {
        return report;
    }

    scene.remove_from_parent(root);
    let subtree = scene.descendants(root);
    for &id in subtree.iter().rev() {
        let geometry = scene
            .get(id)
            .and_then(|node| node.kind.mesh())
            .map(|mesh| mesh.geometry);
        if let Some(geometry) = geometry {
            if scene.dispose_geometry(geometry) {
                report.geometries += 1;
            }
        }

        for material in scene.materials_of(id) {
            let textures = scene.material(material).map(|m| m.textures());
            for texture in textures.iter().flat_map(|slots| slots.iter()) {
                if scene.dispose_texture(texture) {
                    report.textures += 1;
                }
            }
            if scene.dispose_material(material) {
                report.materials += 1;
            }
        }

        if scene.remove_object(id).is_some() {
            report.objects += 1;
        }
    }

    tracing::debug!(
        objects = report.objects,
        geometries = report.geometries,
        materials = report.materials,
        textures = report.textures,
        "disposed object tree"
    );
    report
}
