//! Cogwork Core
//!
//! Value types shared by every Cogwork crate:
//!
//! - **Vectors**: `Vec2` for 2D profiles, `Vec3` for positions and scales
//! - **Matrices**: column-major `Mat4` for transforms
//! - **Colors**: linear RGBA `Color` with `#rrggbb` parsing
//!
//! # Example
//!
//! ```rust
//! use cogwork_core::{Color, Vec3};
//!
//! let slate = Color::parse_hex("#64748b").unwrap();
//! assert_eq!(slate.to_hex_string(), "#64748b");
//!
//! let a = Vec3::new(0.0, 0.0, 0.0);
//! let b = Vec3::new(3.0, 4.0, 0.0);
//! assert_eq!(a.distance(b), 5.0);
//! ```

pub mod color;
pub mod error;
pub mod math;

pub use color::Color;
pub use error::{CoreError, Result};
pub use math::{Mat4, Vec2, Vec3};
