//! Geometry primitives

mod extrude;
mod gear;
mod primitives;
mod shape;
mod vertex;

pub use extrude::{ExtrudeGeometry, ExtrudeOptions};
pub use gear::{GearGeometry, GearOptions};
pub use primitives::{BoxGeometry, CylinderGeometry, SphereGeometry};
pub use shape::Shape;
pub use vertex::{Geometry, Topology, Vertex};
