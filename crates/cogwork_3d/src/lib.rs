//! # Cogwork 3D
//!
//! Procedural geometry and a minimal scene graph for the Cogwork
//! mechanical diagram.
//!
//! This crate provides:
//! - **Geometry**: vertex buffers, primitives, planar shapes and extrusion
//! - **Gear factory**: toothed discs with a bore, a cheaper composite
//!   variant and a helper for laying out gear trains
//! - **Network factory**: glowing nodes placed by one of four layouts,
//!   joined by a sparse, distance-limited random edge set
//! - **Scene graph**: an arena of objects with shared geometry, material
//!   and texture resources
//! - **Lifecycle utilities**: recursive disposal, camera and lighting
//!   setup, renderer creation and resize handling behind host traits
//!
//! ## Quick Start
//!
//! ```rust
//! use cogwork_3d::prelude::*;
//!
//! let mut scene = Scene::new();
//! let gear = create_gear(&mut scene, &GearOptions::new(2.0, 24, 0.4)).unwrap();
//! scene.add(gear.root());
//!
//! let report = dispose_object(&mut scene, gear.root());
//! assert_eq!(report.objects, 2);
//! assert_eq!(scene.object_count(), 0);
//! ```

pub mod error;

// Math utilities
pub mod math;

// Geometry
pub mod geometry;

// Scene graph
pub mod scene;

// Material system
pub mod materials;

// Lighting
pub mod lights;

// Renderer abstraction
pub mod render;

// Gear and network factories
pub mod factory;

// Scene lifecycle helpers
pub mod utils;

// Prelude for common imports
pub mod prelude;

pub use error::{GeometryError, RenderError, Result};
pub use factory::{create_gear, create_network, GearModel, GearOptions, Network, NetworkOptions};
pub use geometry::{Geometry, Vertex};
pub use scene::{ObjectId, Object3D, PerspectiveCamera, Scene};
