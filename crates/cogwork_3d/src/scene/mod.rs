//! Scene graph

mod camera;
mod graph;
mod mesh;
mod object3d;

pub use camera::PerspectiveCamera;
pub use graph::{NodeKind, Parent, Scene, SceneNode, Texture};
pub use mesh::{MaterialSlot, Mesh};
pub use object3d::Object3D;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to an object in a [`Scene`]
    pub struct ObjectId;
    /// Handle to a geometry owned by a [`Scene`]
    pub struct GeometryId;
    /// Handle to a material owned by a [`Scene`]
    pub struct MaterialId;
    /// Handle to a texture owned by a [`Scene`]
    pub struct TextureId;
}
