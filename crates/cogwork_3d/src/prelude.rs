//! Prelude module for convenient imports
//!
//! ```rust
//! use cogwork_3d::prelude::*;
//! ```

pub use crate::error::{GeometryError, RenderError};

pub use crate::math::{BoundingBox, BoundingSphere, Mat4, Mat4Ext, Vec2, Vec3};

pub use crate::geometry::{
    BoxGeometry, CylinderGeometry, ExtrudeGeometry, ExtrudeOptions, GearGeometry, Geometry, Shape,
    SphereGeometry, Topology, Vertex,
};

pub use crate::scene::{
    GeometryId, MaterialId, MaterialSlot, Mesh, NodeKind, Object3D, ObjectId, Parent,
    PerspectiveCamera, Scene, SceneNode, Texture, TextureId,
};

pub use crate::materials::{
    AnyMaterial, BasicMaterial, BlendMode, LineMaterial, Material, MaterialType, StandardMaterial,
    TextureSlots,
};

pub use crate::lights::{LightKind, SceneLight};

pub use crate::render::{
    create_renderer, create_renderer_with, create_resize_handler, is_webgl_available,
    resize_to_container, CanvasStyle, Container, RenderBackend, Renderer, RendererOptions,
    MAX_PIXEL_RATIO,
};

pub use crate::factory::{
    create_connections, create_data_flow_particles, create_gear, create_gear_set, create_network,
    create_node, create_simple_gear, Bounds, CompositeGear, Connections, GearModel, GearOptions,
    LayoutPattern, Network, NetworkOptions, Node, NodeOptions, SolidGear,
};

pub use crate::utils::{
    create_line_material, create_standard_material, dispose_object, hex_to_color,
    position_in_circle, setup_cad_lighting, setup_isometric_camera, CadLighting, DisposeReport,
};

pub use cogwork_core::Color;
