//! Math utilities for 3D graphics

mod bounds;
mod extensions;

pub use bounds::{BoundingBox, BoundingSphere};
pub use extensions::Mat4Ext;

// Re-export common math types from cogwork_core
pub use cogwork_core::{Mat4, Vec2, Vec3};
