//! Scene arena
//!
//! Objects live in a slot map and refer to each other by [`ObjectId`].
//! Geometries, materials and textures are separate resources that several
//! objects may share; they are released explicitly through the `dispose_*`
//! methods (see [`crate::utils::dispose_object`]).

use super::{GeometryId, MaterialId, Mesh, Object3D, ObjectId, TextureId};
use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::lights::SceneLight;
use crate::materials::AnyMaterial;
use cogwork_core::Mat4;
use slotmap::SlotMap;
use smallvec::SmallVec;

/// Texture resource
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub label: String,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn new(label: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            label: label.into(),
            width,
            height,
        }
    }
}

/// What an object is
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Pure transform node
    Group,
    /// Triangle mesh
    Mesh(Mesh),
    /// Independent line segments
    LineSegments(Mesh),
    Light(SceneLight),
}

impl NodeKind {
    pub fn mesh(&self) -> Option<&Mesh> {
        match self {
            NodeKind::Mesh(mesh) | NodeKind::LineSegments(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// Where an object hangs in the graph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parent {
    /// Directly under the scene
    Root,
    Node(ObjectId),
}

/// One object in the scene
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: Option<String>,
    pub transform: Object3D,
    pub kind: NodeKind,
    parent: Option<Parent>,
    children: SmallVec<[ObjectId; 4]>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<Parent> {
        self.parent
    }

    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }
}

/// Scene graph plus the GPU-side resources its meshes reference
#[derive(Default)]
pub struct Scene {
    objects: SlotMap<ObjectId, SceneNode>,
    roots: Vec<ObjectId>,
    geometries: SlotMap<GeometryId, Geometry>,
    materials: SlotMap<MaterialId, AnyMaterial>,
    textures: SlotMap<TextureId, Texture>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Resources ==========

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.insert(geometry)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id)
    }

    /// Release a geometry, returns `false` if it was already released
    pub fn dispose_geometry(&mut self, id: GeometryId) -> bool {
        self.geometries.remove(id).is_some()
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn add_material(&mut self, material: impl Into<AnyMaterial>) -> MaterialId {
        self.materials.insert(material.into())
    }

    pub fn material(&self, id: MaterialId) -> Option<&AnyMaterial> {
        self.materials.get(id)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut AnyMaterial> {
        self.materials.get_mut(id)
    }

    /// Release a material, returns `false` if it was already released
    pub fn dispose_material(&mut self, id: MaterialId) -> bool {
        self.materials.remove(id).is_some()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureId {
        self.textures.insert(texture)
    }

    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id)
    }

    pub fn dispose_texture(&mut self, id: TextureId) -> bool {
        self.textures.remove(id).is_some()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    // ========== Objects ==========

    /// Create a detached object
    pub fn spawn(&mut self, kind: NodeKind, transform: Object3D) -> ObjectId {
        self.objects.insert(SceneNode {
            name: None,
            transform,
            kind,
            parent: None,
            children: SmallVec::new(),
        })
    }

    pub fn spawn_group(&mut self) -> ObjectId {
        self.spawn(NodeKind::Group, Object3D::default())
    }

    pub fn spawn_mesh(&mut self, geometry: GeometryId, material: MaterialId) -> ObjectId {
        self.spawn(NodeKind::Mesh(Mesh::new(geometry, material)), Object3D::default())
    }

    pub fn spawn_line_segments(&mut self, geometry: GeometryId, material: MaterialId) -> ObjectId {
        self.spawn(
            NodeKind::LineSegments(Mesh::new(geometry, material)),
            Object3D::default(),
        )
    }

    pub fn spawn_light(&mut self, light: impl Into<SceneLight>, transform: Object3D) -> ObjectId {
        self.spawn(NodeKind::Light(light.into()), transform)
    }

    pub fn set_name(&mut self, id: ObjectId, name: impl Into<String>) {
        if let Some(node) = self.objects.get_mut(id) {
            node.name = Some(name.into());
        }
    }

    /// Attach an object directly under the scene, moving it from any previous parent
    pub fn add(&mut self, id: ObjectId) -> bool {
        if !self.objects.contains_key(id) {
            return false;
        }
        self.remove_from_parent(id);
        self.roots.push(id);
        if let Some(node) = self.objects.get_mut(id) {
            node.parent = Some(Parent::Root);
        }
        true
    }

    /// Attach `child` under `parent`, moving it from any previous parent
    pub fn add_child(&mut self, parent: ObjectId, child: ObjectId) -> Result<()> {
        if !self.objects.contains_key(parent) || !self.objects.contains_key(child) {
            return Err(GeometryError::MissingObject);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(GeometryError::CyclicHierarchy);
        }
        self.remove_from_parent(child);
        if let Some(node) = self.objects.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.objects.get_mut(child) {
            node.parent = Some(Parent::Node(parent));
        }
        Ok(())
    }

    fn is_ancestor_or_self(&self, ancestor: ObjectId, mut id: ObjectId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.objects.get(id).and_then(|node| node.parent) {
                Some(Parent::Node(parent)) => id = parent,
                _ => return false,
            }
        }
    }

    /// Detach an object from its parent, returns `false` if it had none
    pub fn remove_from_parent(&mut self, id: ObjectId) -> bool {
        let parent = match self.objects.get_mut(id).and_then(|node| node.parent.take()) {
            Some(parent) => parent,
            None => return false,
        };
        match parent {
            Parent::Root => self.roots.retain(|&root| root != id),
            Parent::Node(parent) => {
                if let Some(node) = self.objects.get_mut(parent) {
                    node.children.retain(|child| *child != id);
                }
            }
        }
        true
    }

    /// Remove a single object, detaching it and orphaning its children
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneNode> {
        self.remove_from_parent(id);
        let node = self.objects.remove(id)?;
        for &child in &node.children {
            if let Some(child) = self.objects.get_mut(child) {
                child.parent = None;
            }
        }
        Some(node)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneNode> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneNode> {
        self.objects.get_mut(id)
    }

    pub fn transform(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id).map(|node| &node.transform)
    }

    pub fn transform_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id).map(|node| &mut node.transform)
    }

    /// Materials referenced by a mesh or line object
    pub fn materials_of(&self, id: ObjectId) -> SmallVec<[MaterialId; 2]> {
        self.objects
            .get(id)
            .and_then(|node| node.kind.mesh())
            .map(|mesh| mesh.material.iter().collect())
            .unwrap_or_default()
    }

    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.objects
            .get(id)
            .map_or(&[][..], |node| node.children.as_slice())
    }

    /// Objects attached directly under the scene
    pub fn root_children(&self) -> &[ObjectId] {
        &self.roots
    }

    /// Whether the object is reachable from the scene root
    pub fn is_attached(&self, mut id: ObjectId) -> bool {
        loop {
            match self.objects.get(id).and_then(|node| node.parent) {
                Some(Parent::Root) => return true,
                Some(Parent::Node(parent)) => id = parent,
                None => return false,
            }
        }
    }

    /// The object and all of its descendants, parents before children
    pub fn descendants(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.objects.get(next) {
                out.push(next);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Visit every object attached to the scene, parents first
    pub fn traverse(&self, mut visit: impl FnMut(ObjectId, &SceneNode)) {
        for &root in &self.roots {
            for id in self.descendants(root) {
                if let Some(node) = self.objects.get(id) {
                    visit(id, node);
                }
            }
        }
    }

    /// Object-to-world transform
    pub fn world_matrix(&self, id: ObjectId) -> Option<Mat4> {
        let node = self.objects.get(id)?;
        let local = node.transform.local_matrix();
        match node.parent {
            Some(Parent::Node(parent)) => self.world_matrix(parent).map(|m| m.mul(&local)),
            _ => Some(local),
        }
    }

    /// Lights attached to the scene
    pub fn lights(&self) -> Vec<(ObjectId, &SceneLight)> {
        self.roots
            .iter()
            .flat_map(|&root| self.descendants(root))
            .filter_map(|id| match &self.objects.get(id)?.kind {
                NodeKind::Light(light) => Some((id, light)),
                _ => None,
            })
            .collect()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}
