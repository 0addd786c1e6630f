//! Mesh component

use super::{GeometryId, MaterialId};
use smallvec::SmallVec;

/// One material for the whole mesh, or one per geometry group
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaterialSlot {
    Single(MaterialId),
    Multi(SmallVec<[MaterialId; 2]>),
}

impl MaterialSlot {
    pub fn iter(&self) -> impl Iterator<Item = MaterialId> + '_ {
        let slice: &[MaterialId] = match self {
            MaterialSlot::Single(id) => std::slice::from_ref(id),
            MaterialSlot::Multi(ids) => ids,
        };
        slice.iter().copied()
    }

    /// First material, used when a single color must be reported
    pub fn primary(&self) -> Option<MaterialId> {
        self.iter().next()
    }
}

/// Geometry paired with its material(s)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mesh {
    pub geometry: GeometryId,
    pub material: MaterialSlot,
}

impl Mesh {
    pub fn new(geometry: GeometryId, material: MaterialId) -> Self {
        Self {
            geometry,
            material: MaterialSlot::Single(material),
        }
    }

    /// Mesh with one material per geometry group
    pub fn with_materials(geometry: GeometryId, materials: impl IntoIterator<Item = MaterialId>) -> Self {
        Self {
            geometry,
            material: MaterialSlot::Multi(materials.into_iter().collect()),
        }
    }
}
