//! Error types for cogwork_diagram

use cogwork_3d::{GeometryError, RenderError};
use thiserror::Error;

/// Errors that can occur while setting up the diagram
///
/// None of these reach the host page: [`MechanicalDiagram::mount`] logs them
/// and falls back to rendering nothing.
///
/// [`MechanicalDiagram::mount`]: crate::MechanicalDiagram::mount
#[derive(Error, Debug)]
pub enum DiagramError {
    /// The host cannot create a WebGL context
    #[error("WebGL is not available")]
    WebGlUnavailable,

    /// Building gears, nodes or the scene graph failed
    #[error("scene construction failed: {0}")]
    Geometry(#[from] GeometryError),

    /// Renderer creation or the first frame failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for DiagramError {
    fn from(err: toml::de::Error) -> Self {
        DiagramError::Config(err.to_string())
    }
}

/// Result type for cogwork_diagram operations
pub type Result<T> = std::result::Result<T, DiagramError>;
