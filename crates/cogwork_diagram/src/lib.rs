//! Cogwork Mechanical Diagram
//!
//! A decorative 3D scene: five extruded gears spinning at different rates
//! under a small network of glowing nodes. The component is mounted into a
//! [`Host`], renders on host-delivered animation frames, recolors itself
//! when the page theme flips and releases everything on unmount.
//!
//! # Example (headless)
//!
//! ```rust
//! use cogwork_diagram::prelude::*;
//!
//! let mut host = HeadlessHost::new(800, 400);
//! let mut diagram = MechanicalDiagram::new(DiagramConfig::default());
//!
//! diagram.mount(&mut host, Environment::new(ColorScheme::Light));
//! assert_eq!(diagram.state(), DiagramState::Rendering);
//!
//! drive_frames(&mut diagram, &mut host, 10, 0.0, 16.0);
//! diagram.set_theme(ColorScheme::Dark);
//!
//! diagram.unmount(&mut host);
//! assert_eq!(host.log().live_renderers(), 0);
//! ```

mod config;
mod diagram;
mod environment;
mod error;
mod headless;
mod host;
mod motion;
mod state;

pub use config::{DiagramConfig, GearPlacement, GearStyle, RendererConfig};
pub use diagram::{ContainerAttributes, MechanicalDiagram};
pub use environment::Environment;
pub use error::{DiagramError, Result};
pub use headless::{drive_frames, FrameStats, HeadlessHost, HeadlessRenderer, HostLog};
pub use host::{FrameHandle, Host, ListenerHandle};
pub use motion::{gear_rpm, MotionRig, GEAR_BASE_RPM, GEAR_RPM_STEP};
pub use state::DiagramState;

// Re-export the crates a host needs to implement the traits
pub use cogwork_3d;
pub use cogwork_theme::ColorScheme;

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::{DiagramConfig, GearPlacement, GearStyle};
    pub use crate::diagram::{ContainerAttributes, MechanicalDiagram};
    pub use crate::environment::Environment;
    pub use crate::error::DiagramError;
    pub use crate::headless::{drive_frames, HeadlessHost, HostLog};
    pub use crate::host::{FrameHandle, Host, ListenerHandle};
    pub use crate::state::DiagramState;

    pub use cogwork_3d::render::{CanvasStyle, Container, RenderBackend, Renderer, RendererOptions};
    pub use cogwork_theme::{ColorScheme, DiagramPalette};
}
